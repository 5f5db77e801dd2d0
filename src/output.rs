//! CLI output formatting.
//!
//! Every `format_*` function is pure and returns display lines, so the exact
//! text is unit-tested without capturing stdout. The `print_*` wrappers are
//! what `main` calls.
//!
//! # Output Format
//!
//! Quiet (default) run, only problems and the summary:
//!
//! ```text
//! Skipped: file not found: holiday/missing.png
//! Error: failed to process broken.heic: Image processing failed: ...
//!
//! Processed 2 photos
//! Output: /home/me/prints
//! ```
//!
//! Verbose run, per-step progress and the source → destination mapping:
//!
//! ```text
//! wide.png → DSCF0001.JPG
//!     cropped to 4:3 (2000x1000 → 1333x1000)
//!     metadata copied
//! tall.png → DSCF0002.JPG
//!     already 3:4 (1200x1600), no crop performed
//!     metadata skipped: template not found
//!
//! Processed 2 photos
//!     wide.png → DSCF0001.JPG
//!     tall.png → DSCF0002.JPG
//! Output: /home/me/prints
//! ```

use crate::imaging::Dimensions;
use crate::process::{BatchReport, ProcessEvent};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// File name of `path`, or the whole path when it has none.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `4:3` for landscape, `3:4` for portrait, matching the crop target.
fn ratio_label(width: u32, height: u32) -> &'static str {
    if width > height {
        "4:3"
    } else {
        "3:4"
    }
}

fn size(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "photo" } else { "photos" }
}

// ============================================================================
// Progress events
// ============================================================================

/// Format a single progress event as display lines.
///
/// Skips and failures are always shown; per-step lines only when `verbose`.
pub fn format_process_event(event: &ProcessEvent, verbose: bool) -> Vec<String> {
    match event {
        ProcessEvent::Skipped { source } => {
            vec![format!("Skipped: file not found: {}", source.display())]
        }
        ProcessEvent::Failed { source, error } => {
            vec![format!(
                "Error: failed to process {}: {}",
                source.display(),
                error
            )]
        }
        _ if !verbose => Vec::new(),
        ProcessEvent::ImageStarted { source, output } => {
            vec![format!("{} → {}", file_label(source), file_label(output))]
        }
        ProcessEvent::Cropped { original, geometry } => {
            let Dimensions { width, height } = *original;
            vec![format!(
                "{}cropped to {} ({} → {})",
                indent(1),
                ratio_label(width, height),
                size(width, height),
                size(geometry.width, geometry.height)
            )]
        }
        ProcessEvent::Reencoded { dimensions } => {
            let Dimensions { width, height } = *dimensions;
            vec![format!(
                "{}already {} ({}), no crop performed",
                indent(1),
                ratio_label(width, height),
                size(width, height)
            )]
        }
        ProcessEvent::MetadataCopied => vec![format!("{}metadata copied", indent(1))],
        ProcessEvent::MetadataSkipped { reference } => vec![format!(
            "{}metadata skipped: template not found at {}",
            indent(1),
            reference.display()
        )],
    }
}

/// Print a progress event to stdout.
pub fn print_process_event(event: &ProcessEvent, verbose: bool) {
    for line in format_process_event(event, verbose) {
        println!("{}", line);
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Format the end-of-run summary.
///
/// `output_dir` is shown as given; `main` passes the absolute path.
pub fn format_summary(report: &BatchReport, output_dir: &Path, verbose: bool) -> Vec<String> {
    let count = report.processed.len();
    let mut lines = vec![String::new(), format!("Processed {} {}", count, plural(count))];

    if verbose {
        for image in &report.processed {
            lines.push(format!(
                "{}{} → {}",
                indent(1),
                image.source.display(),
                file_label(&image.output)
            ));
        }
    }

    if !report.skipped.is_empty() {
        lines.push(format!("Skipped {} (not found)", report.skipped.len()));
    }
    if !report.failed.is_empty() {
        lines.push(format!("Failed {}", report.failed.len()));
        for failed in &report.failed {
            lines.push(format!("{}{}", indent(1), failed.source.display()));
        }
    }

    lines.push(format!("Output: {}", output_dir.display()));
    lines
}

/// Print the summary to stdout.
pub fn print_summary(report: &BatchReport, output_dir: &Path, verbose: bool) {
    for line in format_summary(report, output_dir, verbose) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
