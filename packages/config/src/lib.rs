//! # Pagecanvas Config
//!
//! Typed, versioned configuration model for a member site and its pages.
//!
//! This crate is the single source of truth for what a valid document looks
//! like. Everything downstream — the editor store, the renderer, the publish
//! pipeline — consumes these types and never sees a document that failed the
//! load boundary.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ load: JSON → precheck → typed → validate    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ schema: SiteConfig / PageConfig / elements  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Version literals are pinned to [`CURRENT_SCHEMA_VERSION`]; documents
//! authored against any other revision are refused at the boundary, never
//! migrated.

mod error;
mod load;
mod schema;
mod validate;

pub use error::ConfigError;
pub use load::{page_from_json, site_from_json};
pub use schema::{
    DisplaySize, ElementKind, HeaderConfig, IconConfig, ImageDimensions, ImageElementConfig,
    ImageUrlSet, PageConfig, PageElementConfig, SiteConfig, TextElementConfig, ThemeConfig,
    ThemePattern, CURRENT_SCHEMA_VERSION,
};
pub use validate::{validate_page, validate_site, Violation};
