//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_crop;
use super::params::{ConvertParams, CropGeometry, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// What [`normalize_ratio`] did to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    /// Already 4:3 / 3:4; re-encoded only.
    Unchanged(Dimensions),
    /// Center-cropped to the target ratio, then re-encoded.
    Cropped {
        original: Dimensions,
        geometry: CropGeometry,
    },
}

impl CropOutcome {
    pub fn was_cropped(&self) -> bool {
        matches!(self, CropOutcome::Cropped { .. })
    }

    /// Dimensions of the written output.
    pub fn output_dimensions(&self) -> (u32, u32) {
        match self {
            CropOutcome::Unchanged(dims) => (dims.width, dims.height),
            CropOutcome::Cropped { geometry, .. } => (geometry.width, geometry.height),
        }
    }
}

/// Plan the convert operation for a source of known size without executing it.
pub fn plan_normalize(
    source: &Path,
    output: &Path,
    dims: Dimensions,
    quality: Quality,
) -> ConvertParams {
    ConvertParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        crop: calculate_crop(dims),
        quality,
    }
}

/// Bring `source` to 4:3 (landscape) or 3:4 (portrait) and write it to
/// `output` as JPEG.
///
/// Images already within tolerance of their target ratio are only
/// re-encoded. Any backend failure propagates; the caller decides whether
/// the batch continues.
pub fn normalize_ratio(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    quality: Quality,
) -> Result<CropOutcome> {
    let dims = backend.identify(source)?;
    let params = plan_normalize(source, output, dims, quality);
    backend.convert(&params)?;

    Ok(match params.crop {
        Some(geometry) => CropOutcome::Cropped {
            original: dims,
            geometry,
        },
        None => CropOutcome::Unchanged(dims),
    })
}
