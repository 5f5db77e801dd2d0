//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify and convert. Everything else (ratio decisions, crop geometry) is
//! pure calculation in [`calculations`](super::calculations).
//!
//! The production implementation is
//! [`MagickBackend`](super::magick_backend::MagickBackend), which shells out
//! to ImageMagick. Tests use the recording `MockBackend` below.

use super::params::ConvertParams;
use crate::command::CommandError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Trait for image processing backends.
///
/// Implementations block until the underlying work is finished; the pipeline
/// is strictly sequential.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Re-encode `params.source` to `params.output`, cropping first when
    /// `params.crop` is set.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
