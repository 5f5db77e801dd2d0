//! Image processing, delegated to ImageMagick.
//!
//! | Operation | Implementation |
//! |---|---|
//! | **Identify** | `magick identify -format "%w %h"` |
//! | **Ratio decision** | pure functions in [`calculations`] |
//! | **Crop → JPEG** | `magick <src> -crop WxH+X+Y +repage -quality 95 <dst>` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for ratio and crop math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`MagickBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod magick_backend;
pub mod operations;
mod params;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use magick_backend::MagickBackend;
pub use operations::{CropOutcome, normalize_ratio};
pub use params::{ConvertParams, CropGeometry, Quality};
