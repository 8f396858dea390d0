//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: they do no I/O.
//!
//! # Output Format
//!
//! ## Process
//!
//! ```text
//! Processing 3 images
//!     001 a.png  100x50 → 50x25
//!     002 b.jpg  200x100 → 50x25
//!     003 c.jpg  skipped (thumbnail): Failed to decode ...
//!
//! Wrote 2 images to public/gallery/gallery.json (1 skipped)
//! ```
//!
//! ## Check
//!
//! ```text
//! Input:  public/images
//! Output: public/gallery
//! Thumbnails: 400px wide, quality 80
//!
//! Images
//!     001 a.png
//!     002 b.jpg
//! ```

use crate::config::GalleryConfig;
use crate::process::{ProcessEvent, ProcessResult, SkipStage};
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_dims((w, h): (u32, u32)) -> String {
    format!("{}x{}", w, h)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Process output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { image_count } => {
            vec![format!("Processing {}", plural(*image_count, "image"))]
        }
        ProcessEvent::ImageProcessed {
            index,
            filename,
            original,
            thumbnail,
        } => vec![format!(
            "{}{} {}  {} \u{2192} {}",
            indent(1),
            format_index(*index),
            filename,
            format_dims(*original),
            format_dims(*thumbnail)
        )],
        ProcessEvent::ImageSkipped {
            index,
            filename,
            stage,
            reason,
        } => {
            let stage = match stage {
                SkipStage::Metadata => "metadata",
                SkipStage::Thumbnail => "thumbnail",
            };
            vec![format!(
                "{}{} {}  skipped ({}): {}",
                indent(1),
                format_index(*index),
                filename,
                stage,
                reason
            )]
        }
    }
}

/// Format the closing summary of a successful run.
pub fn format_process_summary(result: &ProcessResult) -> Vec<String> {
    let mut line = format!(
        "Wrote {} to {}",
        plural(result.manifest.len(), "image"),
        result.manifest_path.display()
    );
    if !result.skipped.is_empty() {
        line.push_str(&format!(" ({} skipped)", result.skipped.len()));
    }
    vec![String::new(), line]
}

pub fn print_process_summary(result: &ProcessResult) {
    for line in format_process_summary(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the `check` command output: resolved paths and the images that
/// would be processed.
pub fn format_check_output(config: &GalleryConfig, images: &[PathBuf]) -> Vec<String> {
    let mut lines = vec![
        format!("Input:  {}", config.input_path().display()),
        format!("Output: {}", config.output_path().display()),
        format!(
            "Thumbnails: {}px wide, quality {}{}",
            config.thumbnails.width,
            config.thumbnails.quality,
            if config.thumbnails.upscale {
                ", upscaling"
            } else {
                ""
            }
        ),
        String::new(),
    ];

    if images.is_empty() {
        lines.push("No images found".to_string());
        return lines;
    }

    lines.push("Images".to_string());
    for (i, path) in images.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            display_name(path)
        ));
    }
    lines
}

pub fn print_check_output(config: &GalleryConfig, images: &[PathBuf]) {
    for line in format_check_output(config, images) {
        println!("{}", line);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
