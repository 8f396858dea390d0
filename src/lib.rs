//! # Static Gallery
//!
//! Build-time image processing for static web galleries. Point it at a
//! directory of photos under your site's public root; it writes a thumbnail
//! of each and a `gallery.json` manifest that a front-end grid, lightbox or
//! infinite-scroll component can load directly.
//!
//! ```text
//! public/images/*.{jpg,jpeg,png}   →   public/gallery/<same names>   (thumbnails)
//!                                      public/gallery/gallery.json   (manifest)
//! ```
//!
//! The manifest records the *original* dimensions of each image so the
//! layout can reserve space before any thumbnail has loaded.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`process`] | The pipeline: scan, bounded parallel thumbnailing, manifest write |
//! | [`scan`] | Non-recursive listing of qualifying `.jpg`/`.jpeg`/`.png` files |
//! | [`imaging`] | Pure-Rust image operations: probe, auto-orient, resize, encode |
//! | [`naming`] | Public-root-relative URL derivation |
//! | [`types`] | Manifest types serialized to `gallery.json` |
//! | [`config`] | `gallery.toml` loading, layering, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Full Reprocessing
//!
//! Every run regenerates every thumbnail and rewrites the manifest. There is
//! no cache and no change detection; existing files in the output directory
//! are overwritten.
//!
//! ## Consistent Manifest
//!
//! An image only reaches the manifest once its thumbnail is on disk. A
//! thumbnail failure drops that image with a warning; an unreadable image
//! fails the run unless `processing.fail_on_corrupt` is turned off.
//!
//! ## Bounded Parallelism
//!
//! Images are processed on a rayon pool capped by
//! `processing.max_processes`, so a large gallery never decodes more images
//! at once than there are workers.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

pub use config::GalleryConfig;
pub use process::{ProcessError, ProcessResult, process_images};
pub use types::{GalleryImageRecord, GalleryManifest};

#[cfg(test)]
pub(crate) mod test_helpers;
