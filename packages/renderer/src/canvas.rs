//! Edit-canvas projection: one node per element, keyed by uuid so the
//! host can diff DOM nodes across reorders without re-rendering content.

use crate::html::escape;
use pagecanvas_config::{ElementKind, PageConfig, PageElementConfig};
use uuid::Uuid;

/// One element's canvas representation.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    pub uuid: Uuid,
    pub kind: ElementKind,
    /// Inner HTML for the node's content area.
    pub html: String,
}

/// Project a page into canvas nodes, in document order.
pub fn canvas_nodes(page: &PageConfig) -> Vec<CanvasNode> {
    page.elements
        .iter()
        .map(|element| CanvasNode {
            uuid: element.uuid(),
            kind: element.kind(),
            html: element_html(element),
        })
        .collect()
}

fn element_html(element: &PageElementConfig) -> String {
    match element {
        PageElementConfig::Text(text) => text.compiled_value.clone(),
        PageElementConfig::Image(image) if image.url.medium.is_empty() => {
            "<div class=\"image-placeholder\"></div>".to_string()
        }
        PageElementConfig::Image(image) => {
            format!("<img src=\"{}\" alt=\"\">", escape(&image.url.medium))
        }
    }
}
