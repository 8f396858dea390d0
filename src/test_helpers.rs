//! Shared test utilities for the static-gallery test suite.
//!
//! Synthetic image writers and a gallery fixture builder that lays out a
//! `public_root` with an input directory inside a temp dir.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::GalleryConfig;

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> image::RgbImage {
    image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

/// Write a small valid PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a JPEG whose stored pixels are red on the top half and blue on the
/// bottom half, tagged with the given EXIF orientation (1-8).
pub fn create_test_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u8) {
    let img = image::RgbImage::from_fn(width, height, |_, y| {
        if y < height / 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    let mut jpeg = Vec::new();
    img.write_with_encoder(image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 95))
        .unwrap();
    std::fs::write(path, with_exif_orientation(&jpeg, orientation)).unwrap();
}

/// Splice an APP1 segment holding a one-entry big-endian TIFF IFD
/// (tag 0x0112, SHORT) in right after the JPEG SOI marker.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u8) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(b"MM\0\x2A");
    payload.extend_from_slice(&8u32.to_be_bytes());
    payload.extend_from_slice(&1u16.to_be_bytes());
    payload.extend_from_slice(&0x0112u16.to_be_bytes());
    payload.extend_from_slice(&3u16.to_be_bytes());
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.extend_from_slice(&[0, orientation, 0, 0]);
    payload.extend_from_slice(&0u32.to_be_bytes());

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

// =========================================================================
// Gallery fixture
// =========================================================================

/// A temp `public_root` with an `images/` input directory and a config
/// pointing at `gallery/` for output.
pub struct GalleryFixture {
    _tmp: TempDir,
    pub config: GalleryConfig,
}

impl GalleryFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let mut config = GalleryConfig {
            public_root: tmp.path().join("public"),
            ..GalleryConfig::default()
        };
        config.processing.max_processes = Some(2);
        std::fs::create_dir_all(config.input_path()).unwrap();
        Self { _tmp: tmp, config }
    }

    pub fn input(&self, name: &str) -> PathBuf {
        self.config.input_path().join(name)
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.config.output_path().join(name)
    }

    /// Create an empty file in the input directory. Enough for the mock
    /// backend, which never reads content.
    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.input(name);
        std::fs::write(&path, "").unwrap();
        path
    }
}
