//! Blocking subprocess execution shared by the ImageMagick and ExifTool
//! wrappers.
//!
//! Every external tool call goes through [`run_checked`]: the command line is
//! logged at `debug` level, stdout/stderr are captured, and a non-zero exit
//! becomes a [`CommandError::Failed`] carrying the tool's stderr. No timeout
//! is applied; a hung tool hangs the run.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path};
use std::process::{Command, Output, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

impl CommandError {
    /// True when the program could not be started at all (usually not on `PATH`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Render a command as a shell-like line for logs.
pub fn describe(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Render a path as a command-line operand.
///
/// Relative paths that start with a plain name get a `./` prefix, so an
/// input called `-resize.png` reaches the tool as a file, not an option.
pub fn path_arg(path: &Path) -> OsString {
    match path.components().next() {
        Some(Component::Normal(_)) => Path::new(".").join(path).into_os_string(),
        _ => path.as_os_str().to_owned(),
    }
}

/// Run `cmd` to completion, failing on a non-zero exit status.
pub fn run_checked(cmd: &mut Command) -> Result<Output, CommandError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(command = %describe(cmd), "spawning");

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(CommandError::Failed {
            program,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_joins_program_and_args() {
        let mut cmd = Command::new("magick");
        cmd.args(["identify", "-format", "%w %h\\n", "photo.png"]);
        assert_eq!(describe(&cmd), "magick identify -format %w %h\\n photo.png");
    }

    #[test]
    fn relative_operands_get_dot_prefix() {
        assert_eq!(path_arg(Path::new("-resize.png")), "./-resize.png");
        assert_eq!(path_arg(Path::new("in/photo.png")), "./in/photo.png");
    }

    #[test]
    fn anchored_operands_are_unchanged() {
        assert_eq!(path_arg(Path::new("/tmp/-x.png")), "/tmp/-x.png");
        assert_eq!(path_arg(Path::new("./photo.png")), "./photo.png");
        assert_eq!(path_arg(Path::new("../photo.png")), "../photo.png");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run_checked(&mut Command::new("wide-evo-definitely-not-installed")).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("wide-evo-definitely-not-installed"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failed_with_stderr() {
        let err = run_checked(Command::new("sh").args(["-c", "echo broken >&2; exit 3"]))
            .unwrap_err();
        match err {
            CommandError::Failed { program, stderr, .. } => {
                assert_eq!(program, "sh");
                assert_eq!(stderr, "broken");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn success_returns_stdout() {
        let out = run_checked(Command::new("sh").args(["-c", "printf '800 600'"])).unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "800 600");
    }
}
