//! Thumbnail generation and manifest output.
//!
//! Reads every qualifying image in `<public_root>/<input_dir>`, writes a
//! width-constrained thumbnail of each to `<public_root>/<output_dir>` under
//! the same file name, and finishes with `gallery.json` listing every image
//! that made it through.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── images/              # input_dir (untouched)
//! │   ├── a.png
//! │   ├── b.jpg
//! │   └── notes.txt        # ignored
//! └── gallery/             # output_dir
//!     ├── a.png            # thumbnail, same name as source
//!     ├── b.jpg
//!     └── gallery.json     # [{ "urlFull": "/images/a.png", "urlThumb": "/gallery/a.png", ... }]
//! ```
//!
//! ## Failure Policy
//!
//! | Failure | Effect |
//! |---|---|
//! | config invalid (e.g. `output_dir` resolving onto `input_dir`) | run fails before anything is read |
//! | input directory missing/unreadable | run fails before anything is written |
//! | dimensions unreadable | run fails, no manifest (`fail_on_corrupt = true`); or image skipped |
//! | thumbnail decode/encode/write | image skipped and left out of the manifest |
//! | manifest write | run fails |
//!
//! A manifest entry therefore always points at a thumbnail this run wrote.
//!
//! ## Parallel Processing
//!
//! Images are processed on a dedicated [rayon](https://docs.rs/rayon) pool of
//! `processing.max_processes` workers. Per-image results are collected back in
//! listing order and the manifest is assembled on the calling thread once
//! every worker has finished.

use crate::config::{ConfigError, GalleryConfig, effective_threads};
use crate::imaging::{
    BackendError, ImageBackend, Quality, RustBackend, ThumbnailConfig, create_thumbnail,
    get_dimensions,
};
use crate::naming::public_url;
use crate::scan;
use crate::types::{GalleryImageRecord, GalleryManifest};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Cannot read input directory {}: {source}", .path.display())]
    InputDirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to get image metadata for {}: {source}", .path.display())]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Cannot write manifest {}: {source}", .path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Pipeline stage at which an image was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipStage {
    /// Dimensions could not be read (only when `fail_on_corrupt` is off).
    Metadata,
    /// The thumbnail could not be decoded, encoded or written.
    Thumbnail,
}

/// An image left out of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    pub source: PathBuf,
    pub stage: SkipStage,
    pub reason: String,
}

/// Progress events emitted while the pipeline runs.
///
/// `index` is the 1-based position in the sorted listing. Events for
/// different images arrive in completion order, not listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started {
        image_count: usize,
    },
    ImageProcessed {
        index: usize,
        filename: String,
        original: (u32, u32),
        thumbnail: (u32, u32),
    },
    ImageSkipped {
        index: usize,
        filename: String,
        stage: SkipStage,
        reason: String,
    },
}

/// What a run produced.
#[derive(Debug)]
pub struct ProcessResult {
    pub manifest: GalleryManifest,
    pub manifest_path: PathBuf,
    pub skipped: Vec<SkippedImage>,
}

/// Outcome of one image, gathered by the fan-in.
enum ImageOutcome {
    Processed(GalleryImageRecord),
    Skipped(SkippedImage),
}

/// Process the gallery with the pure Rust backend.
pub fn process_images(
    config: &GalleryConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    process_with_backend(&RustBackend::new(), config, progress)
}

/// Process the gallery using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    config: &GalleryConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    // Configs built in code never went through `load_config`.
    config.validate()?;

    let input_dir = config.input_path();
    let output_dir = config.output_path();

    // Listing first: a missing input must not leave an empty output behind.
    let sources = scan::qualifying_images(&input_dir).map_err(|source| {
        ProcessError::InputDirectoryUnreadable {
            path: input_dir.clone(),
            source,
        }
    })?;

    std::fs::create_dir_all(&output_dir).map_err(|source| ProcessError::OutputDirectory {
        path: output_dir.clone(),
        source,
    })?;

    let threads = effective_threads(&config.processing);
    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        images = sources.len(),
        threads,
        "processing gallery"
    );
    emit(
        &progress,
        ProcessEvent::Started {
            image_count: sources.len(),
        },
    );

    let job = ImageJob {
        backend,
        public_root: &config.public_root,
        output_dir: &output_dir,
        thumbnail: ThumbnailConfig {
            width: config.thumbnails.width,
            quality: Quality::new(config.thumbnails.quality),
            upscale: config.thumbnails.upscale,
        },
        fail_on_corrupt: config.processing.fail_on_corrupt,
        progress: &progress,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    let outcomes: Vec<ImageOutcome> = pool.install(|| {
        sources
            .par_iter()
            .enumerate()
            .map(|(i, source)| job.run(i + 1, source))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut records = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            ImageOutcome::Processed(record) => records.push(record),
            ImageOutcome::Skipped(skip) => skipped.push(skip),
        }
    }

    let manifest = GalleryManifest::new(records);
    let manifest_path = GalleryManifest::path_in(&output_dir);
    let json = manifest.to_json()?;
    std::fs::write(&manifest_path, json).map_err(|source| ProcessError::ManifestWrite {
        path: manifest_path.clone(),
        source,
    })?;

    info!(
        manifest = %manifest_path.display(),
        images = manifest.len(),
        skipped = skipped.len(),
        "gallery manifest written"
    );

    Ok(ProcessResult {
        manifest,
        manifest_path,
        skipped,
    })
}

fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is watching.
        let _ = tx.send(event);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Everything a worker needs to process one image. Shared by reference
/// across the pool.
struct ImageJob<'a, B: ImageBackend> {
    backend: &'a B,
    public_root: &'a Path,
    output_dir: &'a Path,
    thumbnail: ThumbnailConfig,
    fail_on_corrupt: bool,
    progress: &'a Option<Sender<ProcessEvent>>,
}

impl<B: ImageBackend> ImageJob<'_, B> {
    fn run(&self, index: usize, source: &Path) -> Result<ImageOutcome, ProcessError> {
        let filename = file_name(source);

        let original = match get_dimensions(self.backend, source) {
            Ok(dims) => dims,
            Err(e) if self.fail_on_corrupt => {
                warn!(source = %source.display(), error = %e, "cannot read image metadata");
                return Err(ProcessError::MetadataRead {
                    path: source.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => return Ok(self.skip(index, filename, source, SkipStage::Metadata, e)),
        };

        let thumb = match create_thumbnail(
            self.backend,
            source,
            self.output_dir,
            original,
            &self.thumbnail,
        ) {
            Ok(thumb) => thumb,
            Err(e) => return Ok(self.skip(index, filename, source, SkipStage::Thumbnail, e)),
        };

        debug!(
            source = %source.display(),
            width = original.0,
            height = original.1,
            thumb_width = thumb.width,
            thumb_height = thumb.height,
            "thumbnail written"
        );
        emit(
            self.progress,
            ProcessEvent::ImageProcessed {
                index,
                filename,
                original,
                thumbnail: (thumb.width, thumb.height),
            },
        );

        Ok(ImageOutcome::Processed(GalleryImageRecord {
            url_full: public_url(source, self.public_root),
            url_thumb: public_url(&thumb.path, self.public_root),
            width: original.0,
            height: original.1,
        }))
    }

    fn skip(
        &self,
        index: usize,
        filename: String,
        source: &Path,
        stage: SkipStage,
        error: BackendError,
    ) -> ImageOutcome {
        let reason = error.to_string();
        warn!(source = %source.display(), ?stage, error = %reason, "skipping image");
        emit(
            self.progress,
            ProcessEvent::ImageSkipped {
                index,
                filename,
                stage,
                reason: reason.clone(),
            },
        );
        ImageOutcome::Skipped(SkippedImage {
            source: source.to_path_buf(),
            stage,
            reason,
        })
    }
}
