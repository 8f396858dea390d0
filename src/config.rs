//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `gallery.toml`. Configuration is
//! layered: stock defaults are overridden by the user's config file, which is
//! in turn overridden by command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! public_root = "public"    # Root all manifest URLs are relative to
//! input_dir = "images"      # Source images, relative to public_root
//! output_dir = "gallery"    # Thumbnails + gallery.json, relative to public_root
//!
//! [thumbnails]
//! width = 400               # Target width; height keeps the aspect ratio
//! quality = 80              # JPEG quality (1-100)
//! upscale = false           # Enlarge sources narrower than `width`
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! fail_on_corrupt = true    # Abort the run when an image cannot be probed
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [thumbnails]
//! width = 320
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have defaults; a user config only needs the values it wants to
/// change. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Filesystem root that every manifest URL is expressed relative to.
    pub public_root: PathBuf,
    /// Directory scanned for source images, relative to `public_root`.
    pub input_dir: PathBuf,
    /// Directory receiving thumbnails and `gallery.json`, relative to `public_root`.
    pub output_dir: PathBuf,
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
    /// Parallel processing and failure policy.
    pub processing: ProcessingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            public_root: PathBuf::from("public"),
            input_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("gallery"),
            thumbnails: ThumbnailsConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Absolute-or-cwd-relative path of the source directory.
    pub fn input_path(&self) -> PathBuf {
        self.public_root.join(&self.input_dir)
    }

    /// Absolute-or-cwd-relative path of the thumbnail directory.
    pub fn output_path(&self) -> PathBuf {
        self.public_root.join(&self.output_dir)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.width == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        // Path::join replaces the base when handed an absolute path, which
        // would silently escape public_root.
        for (key, dir) in [("input_dir", &self.input_dir), ("output_dir", &self.output_dir)] {
            if dir.is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be relative to public_root, got {}",
                    dir.display()
                )));
            }
            if dir.components().any(|c| c == Component::ParentDir) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not contain '..', got {}",
                    dir.display()
                )));
            }
        }
        // Thumbnails reuse the source filename. `./images` and `images` are
        // the same directory, so compare only the named components.
        if normal_components(&self.input_dir) == normal_components(&self.output_dir) {
            return Err(ConfigError::Validation(
                "input_dir and output_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

fn normal_components(dir: &Path) -> Vec<&std::ffi::OsStr> {
    dir.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Target width in pixels. Height is derived from the source aspect ratio.
    pub width: u32,
    /// JPEG encoding quality. PNG output is lossless and ignores it.
    pub quality: u32,
    /// Enlarge sources narrower than `width`. When false they keep their
    /// native size.
    pub upscale: bool,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            width: 400,
            quality: 80,
            upscale: false,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
    /// When true, an image whose dimensions cannot be read aborts the whole
    /// run and no manifest is written. When false it is skipped and logged.
    pub fail_on_corrupt: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_processes: None,
            fail_on_corrupt: true,
        }
    }
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top. `max_processes` is absent
/// here because TOML has no null.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays in order onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = overlays
        .into_iter()
        .fold(stock_defaults_value(), merge_toml);
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to defaults when it is
/// missing.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `gallery.toml` with all keys explained.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Static Gallery Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
# Unknown keys will cause an error.

# Filesystem root that manifest URLs are relative to. A source at
# public/images/a.jpg is listed in gallery.json as /images/a.jpg.
public_root = "public"

# Directory scanned for .jpg/.jpeg/.png files (not recursive), relative to
# public_root.
input_dir = "images"

# Directory receiving thumbnails and gallery.json, relative to public_root.
# Must differ from input_dir: thumbnails keep the source filename.
output_dir = "gallery"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Target width in pixels. Height follows the source aspect ratio.
width = 400

# JPEG encoding quality (1 = worst, 100 = best). PNG output is lossless.
quality = 80

# Enlarge sources narrower than `width`. When false they keep native size.
upscale = false

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# Abort the whole run (no gallery.json written) when any image cannot be
# read. Set to false to skip unreadable images with a warning instead.
fail_on_corrupt = true
"##
}
