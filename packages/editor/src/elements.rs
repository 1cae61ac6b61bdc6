//! # Element Editors
//!
//! Type-specific editing surfaces. Editors own no persistent state; every
//! durable mutation goes through the [`EditorStore`], and derived content
//! (compiled markdown, resized images) comes from injected collaborators.

use crate::markdown::{HtmlSanitizer, MarkdownCompiler};
use crate::store::{EditorStore, ElementPatch, ImageSource, StoreError, TextContent};
use pagecanvas_config::{DisplaySize, ElementKind, ImageDimensions, PageElementConfig};
use thiserror::Error;
use uuid::Uuid;

/// Editing surface for Text elements.
///
/// The store requires raw and compiled values to travel together; this is
/// the one place the compiled value is produced.
pub struct TextElementEditor<'a> {
    compiler: &'a dyn MarkdownCompiler,
    sanitizer: &'a dyn HtmlSanitizer,
}

impl<'a> TextElementEditor<'a> {
    pub fn new(compiler: &'a dyn MarkdownCompiler, sanitizer: &'a dyn HtmlSanitizer) -> Self {
        Self {
            compiler,
            sanitizer,
        }
    }

    /// Markdown collapses blank lines; a literal double-newline is
    /// rewritten around a non-breaking space so a visually-empty line
    /// survives compilation.
    fn normalize_paragraph_breaks(raw: &str) -> String {
        raw.replace("\n\n", "\n\u{a0}\n")
    }

    /// The sanitized compilation of `raw`, exactly as `commit` stores it.
    pub fn compiled_value(&self, raw: &str) -> String {
        let normalized = Self::normalize_paragraph_breaks(raw);
        self.sanitizer.sanitize(&self.compiler.compile(&normalized))
    }

    /// Push a content change: compiles, sanitizes, and patches raw +
    /// compiled values atomically.
    pub fn commit(&self, store: &mut EditorStore, uuid: Uuid, raw: &str) -> Result<(), StoreError> {
        let compiled_value = self.compiled_value(raw);
        store.patch_element(
            uuid,
            ElementPatch::Text {
                content: Some(TextContent {
                    value: raw.to_string(),
                    compiled_value,
                }),
                box_color: None,
            },
        )
    }

    pub fn set_box_color(
        &self,
        store: &mut EditorStore,
        uuid: Uuid,
        color: impl Into<String>,
    ) -> Result<(), StoreError> {
        store.patch_element(
            uuid,
            ElementPatch::Text {
                content: None,
                box_color: Some(color.into()),
            },
        )
    }

    /// Backspace at the start of an element: if the stored value is empty
    /// the element is deleted and focus moves to the previous sibling.
    /// Returns whether a delete happened.
    pub fn backspace_on_empty(
        &self,
        store: &mut EditorStore,
        uuid: Uuid,
    ) -> Result<bool, StoreError> {
        let emptied = match store.element(uuid) {
            Some(PageElementConfig::Text(text)) => text.value.is_empty(),
            Some(other) => {
                return Err(StoreError::ElementKindMismatch {
                    patch: ElementKind::Text,
                    element: other.kind(),
                })
            }
            None => return Err(StoreError::ElementNotFound(uuid)),
        };

        if emptied {
            store.back_delete_element(uuid)?;
        }
        Ok(emptied)
    }
}

/// One resized rendition produced by the image pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedFile {
    /// Longest-edge target in pixels.
    pub size: u32,
    pub data: Vec<u8>,
}

/// `resize(file, sizes, quality) -> {files, originalSize}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOutput {
    pub files: Vec<ResizedFile>,
    pub original_size: ImageDimensions,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResizeError {
    #[error("unsupported image: {0}")]
    Unsupported(String),
}

/// External image-conversion collaborator. The host wires a real
/// pipeline; tests wire a fake.
pub trait ImageResizer {
    fn resize(&self, file: &[u8], sizes: &[u32], quality: u8) -> Result<ResizeOutput, ResizeError>;
}

/// Editing surface for Image elements. Uploading happens outside the
/// core; once the host has urls for the resized renditions it patches
/// them through here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageElementEditor;

impl ImageElementEditor {
    /// Attach a completed upload: url triplet and original dimensions land
    /// in one write.
    pub fn apply_upload(
        &self,
        store: &mut EditorStore,
        uuid: Uuid,
        source: ImageSource,
    ) -> Result<(), StoreError> {
        store.patch_element(
            uuid,
            ElementPatch::Image {
                source: Some(source),
                display_size: None,
            },
        )
    }

    pub fn set_display_size(
        &self,
        store: &mut EditorStore,
        uuid: Uuid,
        display_size: DisplaySize,
    ) -> Result<(), StoreError> {
        store.patch_element(
            uuid,
            ElementPatch::Image {
                source: None,
                display_size: Some(display_size),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{CmarkCompiler, ProfileSanitizer};
    use crate::persist::MemoryPersistence;
    use pagecanvas_config::{ImageUrlSet, PageConfig, TextElementConfig, CURRENT_SCHEMA_VERSION};

    fn store_with_text(value: &str) -> (EditorStore, Uuid) {
        let uuid = Uuid::new_v4();
        let mut element = TextElementConfig::empty(uuid);
        element.value = value.to_string();
        let page = PageConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            path: "/".to_string(),
            title: "Home".to_string(),
            icon: String::new(),
            on_nav: true,
            elements: vec![PageElementConfig::Text(element)],
        };
        (
            EditorStore::new(page, Box::new(MemoryPersistence::new())),
            uuid,
        )
    }

    fn editor<'a>(
        compiler: &'a CmarkCompiler,
        sanitizer: &'a ProfileSanitizer,
    ) -> TextElementEditor<'a> {
        TextElementEditor::new(compiler, sanitizer)
    }

    #[test]
    fn test_commit_stores_raw_and_compiled_together() {
        let (mut store, uuid) = store_with_text("");
        let (compiler, sanitizer) = (CmarkCompiler, ProfileSanitizer);
        let editor = editor(&compiler, &sanitizer);

        editor.commit(&mut store, uuid, "# Hi").unwrap();

        match store.element(uuid).unwrap() {
            PageElementConfig::Text(text) => {
                assert_eq!(text.value, "# Hi");
                assert_eq!(text.compiled_value.trim(), "<h1>Hi</h1>");
            }
            other => panic!("expected text element, got {other:?}"),
        }
    }

    #[test]
    fn test_double_newline_survives_as_nbsp_line() {
        // "Hello\n\nWorld" compiles as "Hello\n&nbsp;\nWorld": the blank
        // line is preserved instead of collapsing into a paragraph break.
        let (mut store, uuid) = store_with_text("");
        let (compiler, sanitizer) = (CmarkCompiler, ProfileSanitizer);
        let editor = editor(&compiler, &sanitizer);

        editor.commit(&mut store, uuid, "Hello\n\nWorld").unwrap();

        match store.element(uuid).unwrap() {
            PageElementConfig::Text(text) => {
                assert_eq!(text.value, "Hello\n\nWorld");
                assert!(text.compiled_value.contains('\u{a0}'), "got: {}", text.compiled_value);
                // One paragraph, not two.
                assert_eq!(text.compiled_value.matches("<p>").count(), 1);
            }
            other => panic!("expected text element, got {other:?}"),
        }
    }

    #[test]
    fn test_compiled_value_matches_commit_for_any_input() {
        let (compiler, sanitizer) = (CmarkCompiler, ProfileSanitizer);
        let editor = editor(&compiler, &sanitizer);

        for raw in ["", "plain", "# h\n\ntext", "a\nb\n\nc", "<script>x</script>"] {
            let (mut store, uuid) = store_with_text("");
            editor.commit(&mut store, uuid, raw).unwrap();
            match store.element(uuid).unwrap() {
                PageElementConfig::Text(text) => {
                    assert_eq!(text.compiled_value, editor.compiled_value(raw));
                }
                other => panic!("expected text element, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_commit_strips_encoded_script_urls_from_inline_html() {
        // Inline HTML passes through the markdown compiler untouched, so
        // the sanitizer is the only gate before compiled_value.
        let (mut store, uuid) = store_with_text("");
        let (compiler, sanitizer) = (CmarkCompiler, ProfileSanitizer);
        let editor = editor(&compiler, &sanitizer);

        editor
            .commit(&mut store, uuid, r##"<a href="&#106;avascript:alert(1)">x</a>"##)
            .unwrap();

        match store.element(uuid).unwrap() {
            PageElementConfig::Text(text) => {
                assert!(
                    text.compiled_value.contains("<a>x</a>"),
                    "got: {}",
                    text.compiled_value
                );
                assert!(!text.compiled_value.contains("avascript:"));
            }
            other => panic!("expected text element, got {other:?}"),
        }
    }

    #[test]
    fn test_backspace_on_empty_deletes() {
        let (mut store, uuid) = store_with_text("");
        let (compiler, sanitizer) = (CmarkCompiler, ProfileSanitizer);
        let editor = editor(&compiler, &sanitizer);

        let deleted = editor.backspace_on_empty(&mut store, uuid).unwrap();
        assert!(deleted);
        assert!(store.element(uuid).is_none());
    }

    #[test]
    fn test_backspace_on_nonempty_keeps_element() {
        let (mut store, uuid) = store_with_text("still here");
        let (compiler, sanitizer) = (CmarkCompiler, ProfileSanitizer);
        let editor = editor(&compiler, &sanitizer);

        let deleted = editor.backspace_on_empty(&mut store, uuid).unwrap();
        assert!(!deleted);
        assert!(store.element(uuid).is_some());
    }

    #[test]
    fn test_apply_upload_patches_urls_and_size_atomically() {
        let (mut store, _) = store_with_text("");
        let uuid = store.add_element(ElementKind::Image, None);

        ImageElementEditor
            .apply_upload(
                &mut store,
                uuid,
                ImageSource {
                    url: ImageUrlSet {
                        large: "l.webp".to_string(),
                        medium: "m.webp".to_string(),
                        small: "s.webp".to_string(),
                    },
                    original_size: ImageDimensions {
                        width: 2048,
                        height: 1024,
                    },
                },
            )
            .unwrap();

        match store.element(uuid).unwrap() {
            PageElementConfig::Image(image) => {
                assert_eq!(image.url.medium, "m.webp");
                assert_eq!(image.original_size.width, 2048);
            }
            other => panic!("expected image element, got {other:?}"),
        }
    }

    #[test]
    fn test_fake_resizer_contract() {
        struct HalvingResizer;
        impl ImageResizer for HalvingResizer {
            fn resize(
                &self,
                file: &[u8],
                sizes: &[u32],
                _quality: u8,
            ) -> Result<ResizeOutput, ResizeError> {
                Ok(ResizeOutput {
                    files: sizes
                        .iter()
                        .map(|&size| ResizedFile {
                            size,
                            data: file[..file.len() / 2].to_vec(),
                        })
                        .collect(),
                    original_size: ImageDimensions {
                        width: 100,
                        height: 50,
                    },
                })
            }
        }

        let output = HalvingResizer.resize(&[0u8; 8], &[1600, 800, 400], 80).unwrap();
        assert_eq!(output.files.len(), 3);
        assert_eq!(output.files[0].size, 1600);
        assert_eq!(output.original_size.height, 50);
    }
}
