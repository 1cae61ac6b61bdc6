//! # Document validation
//!
//! Structural checks the type system cannot express: numeric theme ranges
//! and uuid uniqueness. Required fields, enum membership, and
//! additional-properties rejection are enforced by the serde shapes in
//! [`crate::schema`]; version literals and element discriminants are checked
//! earlier, on the raw JSON, by [`crate::load`].

use crate::schema::{PageConfig, SiteConfig, ThemeConfig};
use std::collections::HashSet;
use std::fmt;

/// One structural violation, addressed by a JSON-pointer-ish path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a full site document. Empty result means valid.
pub fn validate_site(site: &SiteConfig) -> Vec<Violation> {
    let mut validator = Validator::default();
    validator.check_theme("theme", &site.theme);

    if site.subdomain.is_empty() {
        validator.push("subdomain", "must not be empty");
    }

    let mut page_uuids = HashSet::new();
    for (i, page) in site.pages.iter().enumerate() {
        let path = format!("pages[{i}]");
        if !page_uuids.insert(page.uuid) {
            validator.push(&path, format!("duplicate page uuid {}", page.uuid));
        }
        validator.check_page(&path, page);
    }

    validator.violations
}

/// Validate a single page document (the unit the editor loads).
pub fn validate_page(page: &PageConfig) -> Vec<Violation> {
    let mut validator = Validator::default();
    validator.check_page("", page);
    validator.violations
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    fn check_theme(&mut self, path: &str, theme: &ThemeConfig) {
        if theme.hue > 360 {
            self.push(path, format!("hue {} out of range 0-360", theme.hue));
        }
        if theme.saturation > 100 {
            self.push(
                path,
                format!("saturation {} out of range 0-100", theme.saturation),
            );
        }
        if theme.lightness > 100 {
            self.push(
                path,
                format!("lightness {} out of range 0-100", theme.lightness),
            );
        }
        if theme.pattern_intensity > 100 {
            self.push(
                path,
                format!(
                    "patternIntensity {} out of range 0-100",
                    theme.pattern_intensity
                ),
            );
        }
    }

    fn check_page(&mut self, path: &str, page: &PageConfig) {
        let at = |suffix: &str| {
            if path.is_empty() {
                suffix.to_string()
            } else {
                format!("{path}.{suffix}")
            }
        };

        if page.path.is_empty() || !page.path.starts_with('/') {
            self.push(&at("path"), "page path must start with '/'");
        } else if page.path.split('/').any(|segment| segment == "..") {
            // A '..' segment would let the publish pipeline write outside
            // its output directory.
            self.push(&at("path"), "page path must not contain '..' segments");
        }

        let mut element_uuids = HashSet::new();
        for (i, element) in page.elements.iter().enumerate() {
            if !element_uuids.insert(element.uuid()) {
                self.push(
                    &at(&format!("elements[{i}]")),
                    format!("duplicate element uuid {}", element.uuid()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        HeaderConfig, IconConfig, PageElementConfig, TextElementConfig, ThemePattern,
        CURRENT_SCHEMA_VERSION,
    };
    use uuid::Uuid;

    fn minimal_site() -> SiteConfig {
        SiteConfig {
            version: CURRENT_SCHEMA_VERSION,
            title: "Test".to_string(),
            description: String::new(),
            header: HeaderConfig { image_url: None },
            theme: ThemeConfig {
                hue: 200,
                saturation: 50,
                lightness: 50,
                pattern: ThemePattern::None,
                pattern_intensity: 0,
            },
            icon: IconConfig::Emoji {
                value: "🌱".to_string(),
            },
            domain: None,
            subdomain: "test".to_string(),
            pages: vec![],
        }
    }

    #[test]
    fn test_minimal_site_is_valid() {
        assert!(validate_site(&minimal_site()).is_empty());
    }

    #[test]
    fn test_theme_ranges_enforced() {
        let mut site = minimal_site();
        site.theme.hue = 400;
        site.theme.saturation = 150;

        let violations = validate_site(&site);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("hue 400"));
    }

    #[test]
    fn test_duplicate_element_uuid_rejected() {
        let shared = Uuid::new_v4();
        let page = PageConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            path: "/about".to_string(),
            title: "About".to_string(),
            icon: String::new(),
            on_nav: true,
            elements: vec![
                PageElementConfig::Text(TextElementConfig::empty(shared)),
                PageElementConfig::Text(TextElementConfig::empty(shared)),
            ],
        };

        let violations = validate_page(&page);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("duplicate element uuid"));
    }

    #[test]
    fn test_page_path_must_be_rooted() {
        let page = PageConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            path: "about".to_string(),
            title: "About".to_string(),
            icon: String::new(),
            on_nav: false,
            elements: vec![],
        };

        let violations = validate_page(&page);
        assert!(violations.iter().any(|v| v.path == "path"));
    }

    #[test]
    fn test_page_path_rejects_parent_segments() {
        let page = PageConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            path: "/../escaped".to_string(),
            title: "Escaped".to_string(),
            icon: String::new(),
            on_nav: false,
            elements: vec![],
        };

        let violations = validate_page(&page);
        assert!(violations
            .iter()
            .any(|v| v.message.contains("'..' segments")));
    }
}
