//! # Configuration Schema
//!
//! Shapes for a member site, its pages, and the content elements inside
//! them. Element order in `PageConfig::elements` IS the rendered order —
//! there is no separate index field, and the element `uuid` is the sole
//! identity key across reorders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema revision every site/page/element literal is pinned to.
pub const CURRENT_SCHEMA_VERSION: u64 = 1;

/// Site-level document. Exactly one per site; `pages` order is the
/// display/navigation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    pub version: u64,
    pub title: String,
    pub description: String,
    pub header: HeaderConfig,
    pub theme: ThemeConfig,
    pub icon: IconConfig,
    #[serde(default)]
    pub domain: Option<String>,
    pub subdomain: String,
    pub pages: Vec<PageConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeaderConfig {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Site theme, expressed as HSL plus an optional background pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    /// 0-360
    pub hue: u16,
    /// 0-100
    pub saturation: u8,
    /// 0-100
    pub lightness: u8,
    pub pattern: ThemePattern,
    /// 0-100
    pub pattern_intensity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePattern {
    Noise,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum IconConfig {
    Emoji { value: String },
}

/// One routable unit of a published site.
///
/// `uuid` is generated once and immutable; it is how the persistence
/// boundary and the editor address the page regardless of `path` renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    pub version: u64,
    pub uuid: Uuid,
    pub path: String,
    pub title: String,
    pub icon: String,
    pub on_nav: bool,
    pub elements: Vec<PageElementConfig>,
}

impl PageConfig {
    pub fn element(&self, uuid: Uuid) -> Option<&PageElementConfig> {
        self.elements.iter().find(|e| e.uuid() == uuid)
    }

    pub fn element_mut(&mut self, uuid: Uuid) -> Option<&mut PageElementConfig> {
        self.elements.iter_mut().find(|e| e.uuid() == uuid)
    }

    /// Position of an element in the ordered list.
    pub fn position(&self, uuid: Uuid) -> Option<usize> {
        self.elements.iter().position(|e| e.uuid() == uuid)
    }
}

impl SiteConfig {
    pub fn page(&self, uuid: Uuid) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.uuid == uuid)
    }
}

/// A single content block within a page.
///
/// Closed sum over the `type` discriminant; adding a new element type is one
/// new variant arm, enforced by exhaustive matching at every consumption
/// site (validation, store patches, rendering).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageElementConfig {
    Text(TextElementConfig),
    Image(ImageElementConfig),
}

impl PageElementConfig {
    pub fn uuid(&self) -> Uuid {
        match self {
            PageElementConfig::Text(t) => t.uuid,
            PageElementConfig::Image(i) => i.uuid,
        }
    }

    pub fn version(&self) -> u64 {
        match self {
            PageElementConfig::Text(t) => t.version,
            PageElementConfig::Image(i) => i.version,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            PageElementConfig::Text(_) => ElementKind::Text,
            PageElementConfig::Image(_) => ElementKind::Image,
        }
    }
}

/// Element type discriminant, mirroring the closed `{Text, Image}` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Text,
    Image,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Text => write!(f, "Text"),
            ElementKind::Image => write!(f, "Image"),
        }
    }
}

/// Markdown text block.
///
/// Invariant: `compiled_value` is always the sanitized HTML compilation of
/// `value` — never edited directly, always recomputed and stored together
/// with `value` in one write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextElementConfig {
    pub version: u64,
    pub uuid: Uuid,
    pub value: String,
    pub compiled_value: String,
    #[serde(default)]
    pub box_color: Option<String>,
}

impl TextElementConfig {
    /// Fresh empty text block. Empty markdown compiles to empty HTML, so
    /// the compiled-value invariant holds from birth.
    pub fn empty(uuid: Uuid) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            uuid,
            value: String::new(),
            compiled_value: String::new(),
            box_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageElementConfig {
    pub version: u64,
    pub uuid: Uuid,
    pub url: ImageUrlSet,
    pub display_size: DisplaySize,
    pub original_size: ImageDimensions,
}

impl ImageElementConfig {
    /// Fresh image block with no upload attached yet.
    pub fn placeholder(uuid: Uuid) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            uuid,
            url: ImageUrlSet::default(),
            display_size: DisplaySize::Original,
            original_size: ImageDimensions { width: 0, height: 0 },
        }
    }
}

/// Resized variants produced by the upload pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageUrlSet {
    pub large: String,
    pub medium: String,
    pub small: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplaySize {
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "1/3")]
    OneThird,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "2/3")]
    TwoThirds,
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "extra")]
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}
