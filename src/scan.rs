//! Input directory scanning.
//!
//! Lists the *qualifying* files of the input directory: regular files whose
//! extension is `jpg`, `jpeg` or `png`, compared case-insensitively. The scan
//! is not recursive. Subdirectories, other file types, extensionless files
//! and hidden dot-files (e.g. macOS `._IMG_0001.jpg` resource forks, which
//! carry an image extension but no image) are ignored.
//!
//! Entries are returned sorted by path so repeated runs see the same order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions accepted as gallery sources.
pub const QUALIFYING_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Whether `path` names a gallery source, judging by its name alone.
pub fn is_qualifying_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            QUALIFYING_EXTENSIONS
                .iter()
                .any(|q| ext.eq_ignore_ascii_case(q))
        })
}

/// List qualifying image files directly inside `dir`.
///
/// Fails if the directory does not exist or cannot be listed.
pub fn qualifying_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_qualifying_name(&path) && path.is_file() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
