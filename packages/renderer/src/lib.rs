//! # Pagecanvas Renderer
//!
//! Read-only views over validated configuration: static HTML for
//! publishing, and a uuid-keyed node list for the edit canvas. Rendering
//! is infallible — any document that passed the config load boundary
//! renders.

mod canvas;
mod html;

pub use canvas::{canvas_nodes, CanvasNode};
pub use html::{render_page_html, RenderOptions};
