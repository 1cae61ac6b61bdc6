//! # Pagecanvas Editor
//!
//! Core page-content editing engine: the live document store, the
//! drag-reorder gesture engine, and the per-type element editors.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ pointer/touch events (host UI toolkit)      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ drag: gesture state machine                 │
//! │  - click-vs-drag hold window                │
//! │  - furthest-passed-midpoint destination     │
//! │  - emits one move instruction per gesture   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: EditorStore (owns the live page)     │
//! │  - element CRUD + splice reordering         │
//! │  - focus-activation cursor                  │
//! │  - notifies subscribers, pushes to persist  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ persist: load/save boundary (trait)         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is the source of truth**: drag displacement and overlay
//!    positions are presentation, discarded at gesture end
//! 2. **One store per editing session**: no module-level singletons; the
//!    host constructs a store and subscribes explicitly
//! 3. **Atomic mutations**: observers see every operation either not at all
//!    or fully applied — a text value never lands without its compiled form
//! 4. **Geometry is injected**: the drag engine reads layout through a
//!    [`LayoutQuery`], so tests drive it with synthetic rectangles
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecanvas_editor::{EditorStore, MemoryPersistence, ElementKind};
//!
//! let mut store = EditorStore::new(page, Box::new(MemoryPersistence::new()));
//! let uuid = store.add_element(ElementKind::Text, None);
//! ```

mod drag;
mod elements;
mod errors;
mod geometry;
mod markdown;
mod persist;
mod store;

pub use drag::{
    DragEffect, DragEngine, DragFrame, DragState, DragTarget, Displacement, LayoutQuery,
    MoveInstruction, HOLD_WINDOW,
};
pub use elements::{
    ImageElementEditor, ImageResizer, ResizeError, ResizeOutput, ResizedFile, TextElementEditor,
};
pub use errors::EditorError;
pub use geometry::{Point, Rect};
pub use markdown::{CmarkCompiler, HtmlSanitizer, MarkdownCompiler, ProfileSanitizer};
pub use persist::{JsonFilePersistence, MemoryPersistence, PersistenceBoundary, PersistenceError};
pub use store::{
    EditorStore, ElementPatch, ImageSource, MoveDirection, StoreError, StoreEvent, TextContent,
};

// Re-export config types consumers always need alongside the store
pub use pagecanvas_config::{ElementKind, PageConfig, PageElementConfig};
