//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe | `ImageReader::into_decoder` → `dimensions` + `orientation` (header only) |
//! | Decode (JPEG, PNG) | `image` crate decoders |
//! | Auto-orient | `DynamicImage::apply_orientation` from the EXIF orientation tag |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode | `JpegEncoder` (with quality) / `PngEncoder`, chosen by output extension |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::oriented_dimensions;
use super::params::{Quality, ThumbnailParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, e: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Open a decoder, sniffing the format from content with the extension as
/// fallback.
fn open_decoder(path: &Path) -> Result<impl ImageDecoder, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_error(path, e))
}

/// Missing or unparsable EXIF data means the pixels are already upright.
fn read_orientation(decoder: &mut impl ImageDecoder) -> Orientation {
    decoder.orientation().unwrap_or(Orientation::NoTransforms)
}

/// Load, decode and auto-orient an image from disk.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = open_decoder(path)?;
    let orientation = read_orientation(&mut decoder);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Encode to the format named by the output extension and write the file.
///
/// The whole file is encoded in memory first so a failed encode never leaves
/// a truncated thumbnail behind.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        BackendError::ProcessingFailed(format!("Unsupported output format: {}", e))
    })?;

    let mut buf = Vec::new();
    let encoded = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.value() as u8);
            match img {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => {
                    img.write_with_encoder(encoder)
                }
                // JPEG has no alpha and no 16-bit mode.
                _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder),
            }
        }
        ImageFormat::Png => img.write_with_encoder(PngEncoder::new(&mut buf)),
        other => {
            return Err(BackendError::ProcessingFailed(format!(
                "Unsupported output format: {:?}",
                other
            )));
        }
    };
    encoded.map_err(|e| {
        BackendError::ProcessingFailed(format!("Encode failed for {}: {}", path.display(), e))
    })?;

    std::fs::write(path, buf)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let mut decoder = open_decoder(path)?;
        let orientation = read_orientation(&mut decoder);
        let (width, height) = oriented_dimensions(decoder.dimensions(), orientation);
        Ok(Dimensions { width, height })
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_oriented(&params.source)?;

        let resized = if img.width() == params.width && img.height() == params.height {
            img
        } else {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };

        save_image(&resized, &params.output, params.quality)
    }
}
