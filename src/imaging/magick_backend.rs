//! ImageMagick backend: shells out to the `magick` binary (ImageMagick 7).
//!
//! ## Command mapping
//!
//! | Operation | Command |
//! |---|---|
//! | Identify | `magick identify -format "%w %h\n" <source>[0]` |
//! | Re-encode | `magick <source>[0] -quality Q <output>` |
//! | Crop + re-encode | `magick <source>[0] -crop WxH+X+Y +repage -quality Q <output>` |
//!
//! The output format follows the output path's extension, so a `.JPG`
//! destination always produces a baseline JPEG regardless of the input
//! format. `+repage` drops the virtual-canvas offset a crop leaves behind.
//!
//! The `[0]` frame selector reads only the first frame of animated or
//! multi-page inputs. Without it ImageMagick writes one file per frame
//! (`DSCF0001-0.JPG`, `DSCF0001-1.JPG`, ...) and never the requested name.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ConvertParams;
use crate::command::{path_arg, run_checked};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Default program name for ImageMagick 7.
pub const DEFAULT_PROGRAM: &str = "magick";

/// Backend driving the ImageMagick CLI.
#[derive(Debug, Clone)]
pub struct MagickBackend {
    program: String,
}

impl MagickBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Argument list for a convert operation, excluding the program name.
    pub fn convert_args(params: &ConvertParams) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![first_frame(&params.source)];
        if let Some(crop) = params.crop {
            args.push("-crop".into());
            args.push(crop.to_string().into());
            args.push("+repage".into());
        }
        args.push("-quality".into());
        args.push(params.quality.value().to_string().into());
        args.push(path_arg(&params.output));
        args
    }
}

/// `path[0]`: ImageMagick's selector for the first frame.
fn first_frame(path: &Path) -> OsString {
    let mut arg = path_arg(path);
    arg.push("[0]");
    arg
}

impl Default for MagickBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

/// Parse `identify -format "%w %h\n"` output.
///
/// Only the first line is read; `identify` is always asked for frame 0.
pub fn parse_identify_output(stdout: &str) -> Result<Dimensions, BackendError> {
    let first_line = stdout.lines().next().unwrap_or("");
    let mut parts = first_line.split_whitespace();
    let parse = |part: Option<&str>| -> Result<u32, BackendError> {
        part.and_then(|s| s.parse::<u32>().ok()).ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "Unexpected identify output: {:?}",
                stdout.trim()
            ))
        })
    };
    let width = parse(parts.next())?;
    let height = parse(parts.next())?;
    if width == 0 || height == 0 {
        return Err(BackendError::ProcessingFailed(format!(
            "Image has zero size: {width}x{height}"
        )));
    }
    Ok(Dimensions { width, height })
}

impl ImageBackend for MagickBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let output = run_checked(
            Command::new(&self.program)
                .args(["identify", "-format", "%w %h\n"])
                .arg(first_frame(path)),
        )?;
        parse_identify_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        run_checked(Command::new(&self.program).args(Self::convert_args(params)))?;
        Ok(())
    }
}
