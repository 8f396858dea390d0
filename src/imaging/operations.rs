//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_thumbnail_dimensions;
use super::params::{Quality, ThumbnailParams};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get display dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for thumbnail generation.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub quality: Quality,
    pub upscale: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 400,
            quality: Quality::default(),
            upscale: false,
        }
    }
}

/// A thumbnail that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedThumbnail {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Plan a thumbnail operation without executing it.
///
/// The output keeps the source's file name, so a `.png` source yields a
/// `.png` thumbnail.
pub fn plan_thumbnail(
    source: &Path,
    output_dir: &Path,
    original_dims: (u32, u32),
    config: &ThumbnailConfig,
) -> ThumbnailParams {
    let (width, height) = calculate_thumbnail_dimensions(original_dims, config.width, config.upscale);
    let output = match source.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.to_path_buf(),
    };

    ThumbnailParams {
        source: source.to_path_buf(),
        output,
        width,
        height,
        quality: config.quality,
    }
}

/// Create a width-constrained thumbnail in `output_dir`.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    original_dims: (u32, u32),
    config: &ThumbnailConfig,
) -> Result<GeneratedThumbnail> {
    let params = plan_thumbnail(source, output_dir, original_dims, config);
    backend.thumbnail(&params)?;

    Ok(GeneratedThumbnail {
        path: params.output,
        width: params.width,
        height: params.height,
    })
}
