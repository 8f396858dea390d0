//! Manifest types shared between the pipeline and its consumers.
//!
//! `gallery.json` is read by the front-end, so the serialized field names are
//! a public contract: `urlFull`, `urlThumb`, `width`, `height`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the manifest file written into the output directory.
pub const MANIFEST_FILENAME: &str = "gallery.json";

/// One image in the gallery.
///
/// `width`/`height` are the *original* image's display dimensions, not the
/// thumbnail's, so consumers can reserve the right aspect ratio before the
/// thumbnail loads. Sources with a 90° or 270° EXIF orientation are
/// auto-rotated, so they report width and height swapped relative to the
/// pixel dimensions stored in the raw file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageRecord {
    pub url_full: String,
    pub url_thumb: String,
    pub width: u32,
    pub height: u32,
}

/// The gallery manifest: a JSON array of [`GalleryImageRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryManifest {
    pub images: Vec<GalleryImageRecord>,
}

impl GalleryManifest {
    pub fn new(images: Vec<GalleryImageRecord>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Path of the manifest inside `output_dir`.
    pub fn path_in(output_dir: &Path) -> PathBuf {
        output_dir.join(MANIFEST_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GalleryImageRecord {
        GalleryImageRecord {
            url_full: "/images/a.png".to_string(),
            url_thumb: "/gallery/a.png".to_string(),
            width: 100,
            height: 50,
        }
    }

    #[test]
    fn record_uses_camel_case_field_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "urlFull": "/images/a.png",
                "urlThumb": "/gallery/a.png",
                "width": 100,
                "height": 50
            })
        );
    }

    #[test]
    fn manifest_serializes_as_bare_array() {
        let manifest = GalleryManifest::new(vec![record()]);
        let json = manifest.to_json().unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\n  {\n    \"urlFull\": \"/images/a.png\","));
    }

    #[test]
    fn empty_manifest_is_empty_array() {
        assert_eq!(GalleryManifest::default().to_json().unwrap(), "[]");
    }

    #[test]
    fn manifest_parses_front_end_shape() {
        let json = r#"[{"urlFull":"/i/x.jpg","urlThumb":"/g/x.jpg","width":3,"height":4}]"#;
        let manifest: GalleryManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.images[0].url_thumb, "/g/x.jpg");
    }

    #[test]
    fn manifest_path_is_gallery_json() {
        assert_eq!(
            GalleryManifest::path_in(Path::new("public/gallery")),
            PathBuf::from("public/gallery/gallery.json")
        );
    }
}
