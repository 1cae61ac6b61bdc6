//! # Drag-Reorder Engine
//!
//! Translates continuous pointer movement of one dragged element over a
//! static snapshot of its siblings into a single discrete reorder
//! instruction, with live displacement feedback during the gesture.
//!
//! ## State machine
//!
//! ```text
//! Idle ──pointer_down──▶ Pending ──pointer_move──▶ Dragging
//!   ▲                      │  │                       │
//!   │        up within hold window = Click            │
//!   └──────────────────────┴──┴────── up / cancel ────┘
//! ```
//!
//! ## Design
//!
//! - **Snapshot once**: sibling rectangles are captured through the
//!   injected [`LayoutQuery`] at gesture start and never re-read, so the
//!   displacement feedback cannot feed back into the algorithm
//! - **Pure handlers**: every event returns an explicit [`DragEffect`];
//!   the engine never touches the store or the UI itself
//! - **Furthest-passed wins**: the destination is the candidate whose
//!   original position is furthest from the dragged element, so the
//!   reorder commits only once every intermediate sibling's midpoint has
//!   been cleared — no flicker in dense lists
//! - **One gesture at a time**: a pointer-down while a gesture is active
//!   is ignored

use crate::geometry::{Point, Rect};
use crate::store::MoveDirection;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Hold window separating a tap from a drag. A pointer-up inside the
/// window with no intervening move is a click; any move commits to drag.
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Layout capability injected by the host: current rectangle of an element
/// on the canvas. Tests supply synthetic rectangles.
pub trait LayoutQuery {
    fn rect(&self, element: Uuid) -> Option<Rect>;
}

impl<F> LayoutQuery for F
where
    F: Fn(Uuid) -> Option<Rect>,
{
    fn rect(&self, element: Uuid) -> Option<Rect> {
        self(element)
    }
}

/// A sibling considered as a possible destination, with its rectangle as
/// captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTarget {
    pub id: Uuid,
    pub rect: Rect,
}

/// Gesture-scoped state. Created at pointer-down, consumed exactly once at
/// gesture end, never persisted.
#[derive(Debug, Clone)]
pub struct DragState {
    pub element_id: Uuid,
    pub element_rect: Rect,
    pub initial_pointer: Point,
    pub current_pointer: Point,
    /// Siblings in document order, rectangles frozen at gesture start.
    pub targets: Vec<DragTarget>,
    /// Index into `targets` of the current best-guess destination.
    pub target_index: Option<usize>,
    pub target_direction: Option<MoveDirection>,
}

impl DragState {
    pub fn delta(&self) -> Point {
        self.current_pointer - self.initial_pointer
    }
}

/// Visual offset a sibling should render at while the gesture is live.
/// Siblings absent from a frame's list are at identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    pub id: Uuid,
    pub dy: f64,
}

/// One re-render's worth of presentation state. Has no effect on the
/// committed order.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFrame {
    /// Where the dragged element's floating overlay sits (original rect
    /// plus pointer delta).
    pub overlay: Rect,
    pub displacements: Vec<Displacement>,
}

/// The single discrete reorder a completed gesture resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInstruction {
    pub element: Uuid,
    pub target: Uuid,
    pub direction: MoveDirection,
}

/// What the host must do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect {
    None,
    /// Re-render the live gesture.
    Render(DragFrame),
    /// The gesture was a tap: open the element's context menu.
    Click { element: Uuid },
    /// Gesture over: clear every transform, then apply the movement (if
    /// any) to the store.
    Commit { movement: Option<MoveInstruction> },
}

enum Phase {
    Idle,
    /// Pressed; the click-vs-drag arbiter has not resolved yet.
    Pending { state: DragState, pressed_at: Instant },
    Dragging(DragState),
}

/// Gesture engine. One per canvas; owns nothing but the current phase.
pub struct DragEngine {
    phase: Phase,
}

impl DragEngine {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Current gesture state, if a gesture is live.
    pub fn state(&self) -> Option<&DragState> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Pending { state, .. } => Some(state),
            Phase::Dragging(state) => Some(state),
        }
    }

    /// Begin a gesture on `element`. `order` is the page's element order
    /// including the pressed element; rectangles for it and every sibling
    /// are snapshotted now.
    ///
    /// The gesture does not start if a rectangle cannot be produced
    /// (stale layout) or another gesture is already active.
    pub fn pointer_down(
        &mut self,
        element: Uuid,
        pos: Point,
        now: Instant,
        layout: &dyn LayoutQuery,
        order: &[Uuid],
    ) -> DragEffect {
        if !matches!(self.phase, Phase::Idle) {
            return DragEffect::None;
        }

        let Some(element_rect) = layout.rect(element) else {
            return DragEffect::None;
        };

        let mut targets = Vec::with_capacity(order.len().saturating_sub(1));
        for &id in order {
            if id == element {
                continue;
            }
            match layout.rect(id) {
                Some(rect) => targets.push(DragTarget { id, rect }),
                None => return DragEffect::None,
            }
        }

        self.phase = Phase::Pending {
            state: DragState {
                element_id: element,
                element_rect,
                initial_pointer: pos,
                current_pointer: pos,
                targets,
                target_index: None,
                target_direction: None,
            },
            pressed_at: now,
        };
        DragEffect::None
    }

    /// Pointer moved. The first move commits the arbiter to "drag"; every
    /// move while dragging recomputes displacement and destination.
    pub fn pointer_move(&mut self, pos: Point, _now: Instant) -> DragEffect {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => DragEffect::None,
            Phase::Pending { mut state, .. } | Phase::Dragging(mut state) => {
                state.current_pointer = pos;
                let displacements = resolve_destination(&mut state);
                let frame = DragFrame {
                    overlay: state.element_rect.translated(state.delta()),
                    displacements,
                };
                self.phase = Phase::Dragging(state);
                DragEffect::Render(frame)
            }
        }
    }

    /// Pointer released: resolve the gesture.
    pub fn pointer_up(&mut self, now: Instant) -> DragEffect {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => DragEffect::None,
            Phase::Pending { state, pressed_at } => {
                if now.duration_since(pressed_at) < HOLD_WINDOW {
                    DragEffect::Click {
                        element: state.element_id,
                    }
                } else {
                    // Held past the window without moving: a drag that
                    // went nowhere.
                    DragEffect::Commit { movement: None }
                }
            }
            Phase::Dragging(state) => {
                let movement = match (state.target_index, state.target_direction) {
                    (Some(index), Some(direction)) => Some(MoveInstruction {
                        element: state.element_id,
                        target: state.targets[index].id,
                        direction,
                    }),
                    _ => None,
                };
                DragEffect::Commit { movement }
            }
        }
    }

    /// Abort the gesture (a competing gesture won). No move is emitted;
    /// the commit effect clears every sibling transform.
    pub fn cancel(&mut self) -> DragEffect {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => DragEffect::None,
            Phase::Pending { .. } | Phase::Dragging(_) => DragEffect::Commit { movement: None },
        }
    }
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute displacement and destination from the frozen snapshot and the
/// current delta. Pure in (initial rects, delta) — repeating the same
/// inputs yields the same destination.
///
/// Destination selection: among every target whose midpoint the dragged
/// element has passed, the one with the largest `|distance|` from the
/// dragged element's original position wins. Exact ties keep the first
/// candidate in snapshot order (strict comparison) — implementation-
/// defined, documented here.
fn resolve_destination(state: &mut DragState) -> Vec<Displacement> {
    let delta = state.delta();
    let dragged = state.element_rect;
    let mut displacements = Vec::new();
    let mut best: Option<(usize, f64, MoveDirection)> = None;

    for (index, target) in state.targets.iter().enumerate() {
        // Signed, from the original rectangles: positive = target started
        // below the dragged element.
        let distance = target.rect.top - dragged.top;

        let passed = if distance > 0.0 {
            // Compare the dragged element's displaced bottom edge against
            // the target's midpoint.
            delta.y + dragged.bottom() > target.rect.mid_y()
        } else if distance < 0.0 {
            // Symmetric: displaced top edge against the midpoint.
            delta.y + dragged.top < target.rect.mid_y()
        } else {
            false
        };

        if !passed {
            continue;
        }

        // Passed targets make room by the dragged element's height.
        let dy = if distance > 0.0 {
            -dragged.height
        } else {
            dragged.height
        };
        displacements.push(Displacement { id: target.id, dy });

        let further = best
            .map_or(true, |(_, best_distance, _)| distance.abs() > best_distance.abs());
        if further {
            let direction = if distance > 0.0 {
                MoveDirection::Down
            } else {
                MoveDirection::Up
            };
            best = Some((index, distance, direction));
        }
    }

    match best {
        Some((index, _, direction)) => {
            state.target_index = Some(index);
            state.target_direction = Some(direction);
        }
        None => {
            state.target_index = None;
            state.target_direction = None;
        }
    }

    displacements
}
