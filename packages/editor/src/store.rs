//! # Editor Store
//!
//! Exclusive mutable owner of the page currently being edited.
//!
//! ## Design Principles
//!
//! 1. **Explicit instance**: one store per editing session, injected into
//!    whatever hosts the canvas — never a module-level singleton
//! 2. **Atomic operations**: subscribers are notified once per completed
//!    operation; a partial write (a text value without its matching
//!    compiled value) is unrepresentable in the patch types
//! 3. **Persistence is fire-and-forget**: every mutation is pushed to the
//!    boundary; a failed save is logged and surfaced as an event, and the
//!    in-memory document stays the source of truth for the session
//!
//! ## Operation Semantics
//!
//! ### Move
//! - Pure array splice: remove the element, re-locate the target in the
//!   shortened list, insert before (`Up`) or after (`Down`) it
//! - Moving an element onto itself is a documented no-op
//!
//! ### Patch
//! - Typed per element kind; patching a Text field on an Image fails
//! - Unknown uuid fails with [`StoreError::ElementNotFound`] rather than
//!   the silent no-op of older builders — stale references should surface

use crate::persist::{PersistenceBoundary, PersistenceError};
use pagecanvas_config::{
    DisplaySize, ElementKind, ImageDimensions, ImageElementConfig, ImageUrlSet, PageConfig,
    PageElementConfig, TextElementConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Where an element lands relative to its move target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Immediately before the target.
    Up,
    /// Immediately after the target.
    Down,
}

/// Raw markdown source and its sanitized compilation, travelling as one
/// unit. Compilation is the element editor's job, not the store's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    pub compiled_value: String,
}

/// Url triplet and original dimensions produced by one upload, travelling
/// as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: ImageUrlSet,
    pub original_size: ImageDimensions,
}

/// Partial update for a single element, typed per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementPatch {
    Text {
        content: Option<TextContent>,
        box_color: Option<String>,
    },
    Image {
        source: Option<ImageSource>,
        display_size: Option<DisplaySize>,
    },
}

impl ElementPatch {
    fn kind(&self) -> ElementKind {
        match self {
            ElementPatch::Text { .. } => ElementKind::Text,
            ElementPatch::Image { .. } => ElementKind::Image,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("element not found: {0}")]
    ElementNotFound(Uuid),

    #[error("{patch} patch does not apply to {element} element")]
    ElementKindMismatch {
        patch: ElementKind,
        element: ElementKind,
    },
}

/// Notification pushed to subscribers after each completed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    ElementAdded { uuid: Uuid },
    ElementPatched { uuid: Uuid },
    ElementRemoved { uuid: Uuid },
    ElementMoved { uuid: Uuid },
    FocusChanged { uuid: Option<Uuid> },
    SaveFailed { message: String },
}

/// The live, in-memory page document plus its observers.
pub struct EditorStore {
    page: PageConfig,
    persistence: Box<dyn PersistenceBoundary>,
    subscribers: Vec<Box<dyn Fn(&StoreEvent)>>,
    focus_activation: Option<Uuid>,
}

impl EditorStore {
    /// Wrap an already-loaded page. The document must have passed the
    /// config load boundary — the store assumes it is valid.
    pub fn new(page: PageConfig, persistence: Box<dyn PersistenceBoundary>) -> Self {
        Self {
            page,
            persistence,
            subscribers: Vec::new(),
            focus_activation: None,
        }
    }

    /// Load the page through the persistence boundary at editor mount.
    pub fn open(
        page_id: Uuid,
        persistence: Box<dyn PersistenceBoundary>,
    ) -> Result<Self, PersistenceError> {
        let page = persistence.load(page_id)?;
        Ok(Self::new(page, persistence))
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    pub fn elements(&self) -> &[PageElementConfig] {
        &self.page.elements
    }

    pub fn element(&self, uuid: Uuid) -> Option<&PageElementConfig> {
        self.page.element(uuid)
    }

    /// Current element order, as uuids. The drag engine snapshots this at
    /// gesture start.
    pub fn element_order(&self) -> Vec<Uuid> {
        self.page.elements.iter().map(|e| e.uuid()).collect()
    }

    /// Which element should receive input focus after the last structural
    /// change, if any.
    pub fn focus_activation(&self) -> Option<Uuid> {
        self.focus_activation
    }

    pub fn set_focus_activation(&mut self, uuid: Option<Uuid>) {
        self.focus_activation = uuid;
        self.notify(&StoreEvent::FocusChanged { uuid });
    }

    /// Register an observer. Subscribers live as long as the store.
    pub fn subscribe(&mut self, subscriber: impl Fn(&StoreEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Create a new element of default content, inserted at `at` (clamped)
    /// or appended. Returns the fresh uuid.
    ///
    /// A new Text element is born with its (empty) markdown already
    /// compiled: empty source compiles to empty HTML, so the
    /// compiled-value invariant holds without consulting the compiler.
    pub fn add_element(&mut self, kind: ElementKind, at: Option<usize>) -> Uuid {
        let uuid = Uuid::new_v4();
        let element = match kind {
            ElementKind::Text => PageElementConfig::Text(TextElementConfig::empty(uuid)),
            ElementKind::Image => PageElementConfig::Image(ImageElementConfig::placeholder(uuid)),
        };

        let index = at.unwrap_or(self.page.elements.len()).min(self.page.elements.len());
        self.page.elements.insert(index, element);

        tracing::debug!(%uuid, %kind, index, "element added");
        self.commit(StoreEvent::ElementAdded { uuid });
        uuid
    }

    /// Merge fields into the element matching `uuid`.
    pub fn patch_element(&mut self, uuid: Uuid, patch: ElementPatch) -> Result<(), StoreError> {
        let patch_kind = patch.kind();
        let element = self
            .page
            .element_mut(uuid)
            .ok_or(StoreError::ElementNotFound(uuid))?;

        match (element, patch) {
            (
                PageElementConfig::Text(text),
                ElementPatch::Text { content, box_color },
            ) => {
                if let Some(content) = content {
                    text.value = content.value;
                    text.compiled_value = content.compiled_value;
                }
                if let Some(box_color) = box_color {
                    text.box_color = Some(box_color);
                }
            }
            (
                PageElementConfig::Image(image),
                ElementPatch::Image {
                    source,
                    display_size,
                },
            ) => {
                if let Some(source) = source {
                    image.url = source.url;
                    image.original_size = source.original_size;
                }
                if let Some(display_size) = display_size {
                    image.display_size = display_size;
                }
            }
            (element, _) => {
                return Err(StoreError::ElementKindMismatch {
                    patch: patch_kind,
                    element: element.kind(),
                });
            }
        }

        tracing::debug!(%uuid, "element patched");
        self.commit(StoreEvent::ElementPatched { uuid });
        Ok(())
    }

    /// Delete the element from the ordered list.
    pub fn remove_element(&mut self, uuid: Uuid) -> Result<(), StoreError> {
        let index = self
            .page
            .position(uuid)
            .ok_or(StoreError::ElementNotFound(uuid))?;
        self.page.elements.remove(index);

        tracing::debug!(%uuid, "element removed");
        self.commit(StoreEvent::ElementRemoved { uuid });
        Ok(())
    }

    /// Delete-to-merge: remove an emptied element and hand focus to its
    /// previous sibling (or nothing if it was first).
    pub fn back_delete_element(&mut self, uuid: Uuid) -> Result<(), StoreError> {
        let index = self
            .page
            .position(uuid)
            .ok_or(StoreError::ElementNotFound(uuid))?;
        let previous = if index > 0 {
            Some(self.page.elements[index - 1].uuid())
        } else {
            None
        };

        self.page.elements.remove(index);
        tracing::debug!(%uuid, "element back-deleted");
        self.commit(StoreEvent::ElementRemoved { uuid });
        self.set_focus_activation(previous);
        Ok(())
    }

    /// Relocate `element_id` immediately before (`Up`) or after (`Down`)
    /// `target_id`. The target's position is recomputed after removal, so
    /// this is a pure splice regardless of the elements' relative order.
    pub fn move_element(
        &mut self,
        element_id: Uuid,
        target_id: Uuid,
        direction: MoveDirection,
    ) -> Result<(), StoreError> {
        if element_id == target_id {
            // Dragging an element onto its own slot.
            return Ok(());
        }

        let from = self
            .page
            .position(element_id)
            .ok_or(StoreError::ElementNotFound(element_id))?;
        if self.page.position(target_id).is_none() {
            return Err(StoreError::ElementNotFound(target_id));
        }

        let element = self.page.elements.remove(from);
        let target_index = match self.page.position(target_id) {
            Some(index) => index,
            None => {
                // Unreachable given the check above; restore rather than
                // corrupt the document if it ever happens.
                self.page.elements.insert(from, element);
                return Err(StoreError::ElementNotFound(target_id));
            }
        };

        let insert_at = match direction {
            MoveDirection::Up => target_index,
            MoveDirection::Down => target_index + 1,
        };
        self.page.elements.insert(insert_at, element);

        tracing::debug!(%element_id, %target_id, ?direction, "element moved");
        self.commit(StoreEvent::ElementMoved { uuid: element_id });
        Ok(())
    }

    /// Push the document to the persistence boundary and notify observers.
    /// Save failure does not roll anything back.
    fn commit(&mut self, event: StoreEvent) {
        if let Err(err) = self.persistence.save(&self.page) {
            tracing::warn!(page = %self.page.uuid, %err, "save failed, continuing locally");
            self.notify(&StoreEvent::SaveFailed {
                message: err.to_string(),
            });
        }
        self.notify(&event);
    }

    fn notify(&self, event: &StoreEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}
