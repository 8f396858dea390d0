//! Image processing in pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | header-only decoder probe + EXIF orientation |
//! | **Thumbnail** | decode → auto-orient → Lanczos3 `resize_exact` → JPEG/PNG encode |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_thumbnail_dimensions, oriented_dimensions};
pub use operations::{
    GeneratedThumbnail, ThumbnailConfig, create_thumbnail, get_dimensions, plan_thumbnail,
};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
