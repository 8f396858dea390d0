//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify (cheap dimension probe) and thumbnail (decode, orient, resize,
//! encode). The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::ThumbnailParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` because the pipeline shares one backend across the rayon pool.
pub trait ImageBackend: Sync {
    /// Get display dimensions (after orientation) without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a thumbnail operation.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// Results are keyed by file name rather than call order, since the
    /// pipeline calls the backend from several threads at once.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: HashMap<String, Dimensions>,
        pub failing_thumbnails: HashSet<String>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Thumbnail {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Files not listed here fail to identify.
        pub fn with_dimensions(dims: &[(&str, u32, u32)]) -> Self {
            Self {
                dimensions: dims
                    .iter()
                    .map(|&(name, width, height)| (name.to_string(), Dimensions { width, height }))
                    .collect(),
                ..Self::default()
            }
        }

        pub fn failing_thumbnail(mut self, name: &str) -> Self {
            self.failing_thumbnails.insert(name.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn thumbnail_ops(&self) -> Vec<RecordedOp> {
            self.get_operations()
                .into_iter()
                .filter(|op| matches!(op, RecordedOp::Thumbnail { .. }))
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.dimensions
                .get(&file_name(path))
                .copied()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Thumbnail {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });

            if self.failing_thumbnails.contains(&file_name(&params.source)) {
                return Err(BackendError::ProcessingFailed(
                    "Mock thumbnail failure".to_string(),
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(&[("image.jpg", 800, 600)]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_unknown_file_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/test/missing.jpg")).is_err());
    }

    #[test]
    fn mock_records_failing_thumbnail() {
        let backend = MockBackend::new().failing_thumbnail("broken.png");

        let result = backend.thumbnail(&ThumbnailParams {
            source: "/in/broken.png".into(),
            output: "/out/broken.png".into(),
            width: 50,
            height: 25,
            quality: Quality::new(80),
        });
        assert!(result.is_err());

        let ops = backend.thumbnail_ops();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Thumbnail {
                width: 50,
                height: 25,
                quality: 80,
                ..
            }
        ));
    }
}
