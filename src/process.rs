//! Batch driver: turn a list of photos into printer-ready `DSCFNNNN.JPG` files.
//!
//! For each input, in the order given:
//!
//! ```text
//! exists? ──no──▶ Skipped
//!    │yes
//!    ▼
//! next output name ─▶ normalize_ratio ─▶ copy_reference_metadata ─▶ Processed
//!    │                     │                      │
//!    └─────────────────────┴──── any error ───────┴─▶ Failed (batch continues)
//! ```
//!
//! One bad photo never aborts the batch. Progress is reported as
//! [`ProcessEvent`]s over an optional channel; the caller decides how to
//! display them (see [`output`](crate::output)).
//!
//! ## Sequential by design of the naming scheme
//!
//! Images are processed one at a time. The output name is chosen by scanning
//! the directory for the first free index, which is only safe while nothing
//! else writes into that directory (see [`naming`](crate::naming)).

use crate::config::Settings;
use crate::imaging::{
    BackendError, CropGeometry, CropOutcome, Dimensions, ImageBackend, MagickBackend,
    normalize_ratio,
};
use crate::metadata::{
    ExifTool, MetadataError, MetadataOutcome, MetadataTool, copy_reference_metadata,
};
use crate::naming::NamingError;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Metadata copy failed: {0}")]
    Metadata(#[from] MetadataError),
}

/// Progress reported while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// Input path does not exist.
    Skipped { source: PathBuf },
    /// Output name chosen, work on this image begins.
    ImageStarted { source: PathBuf, output: PathBuf },
    /// Center-cropped to the target ratio.
    Cropped {
        original: Dimensions,
        geometry: CropGeometry,
    },
    /// Already at the target ratio; re-encoded without cropping.
    Reencoded { dimensions: Dimensions },
    MetadataCopied,
    /// Template vanished after startup; output kept without camera tags.
    MetadataSkipped { reference: PathBuf },
    Failed { source: PathBuf, error: String },
}

/// One successfully written output.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub cropped: bool,
    pub metadata: MetadataOutcome,
}

/// An input that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedImage {
    pub source: PathBuf,
    pub error: String,
}

/// Everything that happened in one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedImage>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

fn emit(events: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening.
        let _ = tx.send(event);
    }
}

/// Process a batch with the ImageMagick and ExifTool programs named in
/// `settings`.
pub fn process(
    settings: &Settings,
    inputs: &[PathBuf],
    output_dir: &Path,
    events: Option<Sender<ProcessEvent>>,
) -> BatchReport {
    let backend = MagickBackend::new(settings.magick.as_str());
    let exiftool = ExifTool::new(settings.exiftool.as_str());
    process_batch(&backend, &exiftool, settings, inputs, output_dir, events)
}

/// Process a batch using specific tools (allows testing with mocks).
///
/// `output_dir` must already exist.
pub fn process_batch(
    backend: &impl ImageBackend,
    metadata_tool: &impl MetadataTool,
    settings: &Settings,
    inputs: &[PathBuf],
    output_dir: &Path,
    events: Option<Sender<ProcessEvent>>,
) -> BatchReport {
    let events = events.as_ref();
    let mut report = BatchReport::default();

    for source in inputs {
        if !source.exists() {
            emit(
                events,
                ProcessEvent::Skipped {
                    source: source.clone(),
                },
            );
            report.skipped.push(source.clone());
            continue;
        }

        match process_image(backend, metadata_tool, settings, source, output_dir, events) {
            Ok(image) => report.processed.push(image),
            Err(e) => {
                tracing::debug!(source = %source.display(), error = ?e, "image failed");
                let error = e.to_string();
                emit(
                    events,
                    ProcessEvent::Failed {
                        source: source.clone(),
                        error: error.clone(),
                    },
                );
                report.failed.push(FailedImage {
                    source: source.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// Crop, re-encode and stamp a single existing image.
///
/// On failure, a half-written output is removed so the sequence slot is
/// free again.
pub fn process_image(
    backend: &impl ImageBackend,
    metadata_tool: &impl MetadataTool,
    settings: &Settings,
    source: &Path,
    output_dir: &Path,
    events: Option<&Sender<ProcessEvent>>,
) -> Result<ProcessedImage, ProcessError> {
    let output = settings.naming.next_output_path(output_dir)?;
    emit(
        events,
        ProcessEvent::ImageStarted {
            source: source.to_path_buf(),
            output: output.clone(),
        },
    );

    let result = convert_and_stamp(backend, metadata_tool, settings, source, &output, events);
    if result.is_err() && output.is_file() {
        if let Err(e) = std::fs::remove_file(&output) {
            tracing::warn!(output = %output.display(), error = %e, "could not remove partial output");
        }
    }
    let (cropped, metadata) = result?;

    Ok(ProcessedImage {
        source: source.to_path_buf(),
        output,
        cropped,
        metadata,
    })
}

fn convert_and_stamp(
    backend: &impl ImageBackend,
    metadata_tool: &impl MetadataTool,
    settings: &Settings,
    source: &Path,
    output: &Path,
    events: Option<&Sender<ProcessEvent>>,
) -> Result<(bool, MetadataOutcome), ProcessError> {
    let outcome = normalize_ratio(backend, source, output, settings.quality)?;
    emit(
        events,
        match outcome {
            CropOutcome::Cropped { original, geometry } => {
                ProcessEvent::Cropped { original, geometry }
            }
            CropOutcome::Unchanged(dimensions) => ProcessEvent::Reencoded { dimensions },
        },
    );

    let metadata =
        copy_reference_metadata(metadata_tool, &settings.template, output, settings.tags)?;
    emit(
        events,
        match metadata {
            MetadataOutcome::Copied => ProcessEvent::MetadataCopied,
            MetadataOutcome::SkippedMissingReference => ProcessEvent::MetadataSkipped {
                reference: settings.template.clone(),
            },
        },
    );

    Ok((outcome.was_cropped(), metadata))
}
