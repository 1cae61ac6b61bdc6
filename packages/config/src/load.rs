//! # Load boundary
//!
//! JSON enters the system here and nowhere else. Version literals and
//! element discriminants are checked on the raw value before typed
//! deserialization so the failure taxonomy is precise
//! ([`ConfigError::SchemaVersionMismatch`], [`ConfigError::UnknownElementType`])
//! instead of a generic serde message, and a single bad element fails the
//! whole load rather than being dropped.

use crate::error::ConfigError;
use crate::schema::{PageConfig, SiteConfig, CURRENT_SCHEMA_VERSION};
use crate::validate::{validate_page, validate_site};
use serde_json::Value;

const ELEMENT_TYPES: [&str; 2] = ["Text", "Image"];

/// Load and validate a full site document.
pub fn site_from_json(json: &str) -> Result<SiteConfig, ConfigError> {
    let value: Value = serde_json::from_str(json)?;

    check_version(&value, "")?;
    if let Some(pages) = value.get("pages").and_then(Value::as_array) {
        for (i, page) in pages.iter().enumerate() {
            precheck_page(page, &format!("pages[{i}]"))?;
        }
    }

    let site: SiteConfig = serde_json::from_value(value)?;

    let violations = validate_site(&site);
    if !violations.is_empty() {
        return Err(ConfigError::Invalid(violations));
    }

    Ok(site)
}

impl SiteConfig {
    /// Pretty-printed JSON, the format the publish pipeline and durable
    /// storage write.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PageConfig {
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load and validate a single page document.
pub fn page_from_json(json: &str) -> Result<PageConfig, ConfigError> {
    let value: Value = serde_json::from_str(json)?;
    precheck_page(&value, "")?;

    let page: PageConfig = serde_json::from_value(value)?;

    let violations = validate_page(&page);
    if !violations.is_empty() {
        return Err(ConfigError::Invalid(violations));
    }

    Ok(page)
}

fn precheck_page(value: &Value, path: &str) -> Result<(), ConfigError> {
    check_version(value, path)?;

    if let Some(elements) = value.get("elements").and_then(Value::as_array) {
        for (i, element) in elements.iter().enumerate() {
            let element_path = join(path, &format!("elements[{i}]"));
            check_version(element, &element_path)?;
            check_discriminant(element, &element_path)?;
        }
    }

    Ok(())
}

fn check_version(value: &Value, path: &str) -> Result<(), ConfigError> {
    // A missing or non-numeric version falls through to the typed
    // deserialization error; only a recognizably wrong literal is refused
    // here.
    if let Some(found) = value.get("version").and_then(Value::as_u64) {
        if found != CURRENT_SCHEMA_VERSION {
            return Err(ConfigError::SchemaVersionMismatch {
                path: display_path(path),
                found,
                expected: CURRENT_SCHEMA_VERSION,
            });
        }
    }
    Ok(())
}

fn check_discriminant(value: &Value, path: &str) -> Result<(), ConfigError> {
    if let Some(found) = value.get("type").and_then(Value::as_str) {
        if !ELEMENT_TYPES.contains(&found) {
            return Err(ConfigError::UnknownElementType {
                path: display_path(path),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

fn join(path: &str, suffix: &str) -> String {
    if path.is_empty() {
        suffix.to_string()
    } else {
        format!("{path}.{suffix}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "document root".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PageElementConfig;

    const PAGE_JSON: &str = r##"{
        "version": 1,
        "uuid": "6e9e1740-9e1e-4a5f-9c3a-222222222222",
        "path": "/",
        "title": "Home",
        "icon": "🏠",
        "onNav": true,
        "elements": [
            {
                "type": "Text",
                "version": 1,
                "uuid": "6e9e1740-9e1e-4a5f-9c3a-333333333333",
                "value": "# Hi",
                "compiledValue": "<h1>Hi</h1>"
            },
            {
                "type": "Image",
                "version": 1,
                "uuid": "6e9e1740-9e1e-4a5f-9c3a-444444444444",
                "url": { "large": "l.webp", "medium": "m.webp", "small": "s.webp" },
                "displaySize": "1/2",
                "originalSize": { "width": 1200, "height": 800 }
            }
        ]
    }"##;

    #[test]
    fn test_page_loads_both_element_kinds() {
        let page = page_from_json(PAGE_JSON).unwrap();
        assert_eq!(page.elements.len(), 2);
        assert!(matches!(page.elements[0], PageElementConfig::Text(_)));
        assert!(matches!(page.elements[1], PageElementConfig::Image(_)));
    }

    #[test]
    fn test_version_mismatch_refused() {
        let json = PAGE_JSON.replacen(r#""version": 1"#, r#""version": 2"#, 1);
        let err = page_from_json(&json).unwrap_err();

        match err {
            ConfigError::SchemaVersionMismatch { found, .. } => assert_eq!(found, 2),
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_element_version_mismatch_names_its_path() {
        let json = PAGE_JSON.replace(
            r#""type": "Image",
                "version": 1"#,
            r#""type": "Image",
                "version": 7"#,
        );
        let err = page_from_json(&json).unwrap_err();

        match err {
            ConfigError::SchemaVersionMismatch { path, found, .. } => {
                assert_eq!(found, 7);
                assert_eq!(path, "elements[1]");
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_element_type_fails_whole_load() {
        let json = PAGE_JSON.replacen(r#""type": "Text""#, r#""type": "Video""#, 1);
        let err = page_from_json(&json).unwrap_err();

        match err {
            ConfigError::UnknownElementType { found, path } => {
                assert_eq!(found, "Video");
                assert_eq!(path, "elements[0]");
            }
            other => panic!("expected unknown element type, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_document_never_loads() {
        // Duplicate the first element's uuid into the second.
        let json = PAGE_JSON.replace("444444444444", "333333333333");
        let err = page_from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
