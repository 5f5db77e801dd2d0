//! Startup check for the external tools.
//!
//! Both tools are probed with a trivial version argument before any input is
//! touched. A tool that cannot be started, or that exits non-zero, is fatal.

use crate::command::{CommandError, run_checked};
use std::process::Command;
use thiserror::Error;

/// One external tool the pipeline depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Human name used in messages.
    pub name: &'static str,
    /// Program to run (name on `PATH` or a full path).
    pub program: String,
    /// Cheap argument that makes the tool print its version and exit 0.
    pub version_arg: &'static str,
    /// How to install it.
    pub install_hint: &'static str,
}

impl Tool {
    pub fn exiftool(program: impl Into<String>) -> Self {
        Self {
            name: "ExifTool",
            program: program.into(),
            version_arg: "-ver",
            install_hint: "brew install exiftool  (Debian/Ubuntu: apt install libimage-exiftool-perl)",
        }
    }

    pub fn imagemagick(program: impl Into<String>) -> Self {
        Self {
            name: "ImageMagick",
            program: program.into(),
            version_arg: "-version",
            install_hint: "brew install imagemagick  (Debian/Ubuntu: apt install imagemagick)",
        }
    }
}

#[derive(Error, Debug)]
#[error(
    "{} ({}) is not available: {source}\n  install it with: {}",
    .tool.name,
    .tool.program,
    .tool.install_hint
)]
pub struct DependencyError {
    pub tool: Tool,
    #[source]
    pub source: CommandError,
}

/// Probe every tool in order, stopping at the first one that fails.
pub fn probe(tools: &[Tool]) -> Result<(), DependencyError> {
    for tool in tools {
        run_checked(Command::new(&tool.program).arg(tool.version_arg)).map_err(|source| {
            DependencyError {
                tool: tool.clone(),
                source,
            }
        })?;
        tracing::debug!(tool = tool.name, program = %tool.program, "dependency found");
    }
    Ok(())
}
