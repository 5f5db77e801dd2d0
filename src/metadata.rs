//! Camera metadata stamping.
//!
//! instax Wide printers only accept photos that look like they came from a
//! supported Fujifilm camera. After re-encoding, each output gets a fixed set
//! of camera-identification tags copied from a reference photo (the
//! *template*) taken with such a camera.
//!
//! ## What is copied
//!
//! Exactly the tags in [`COPIED_TAGS`]: make, model, firmware, serial
//! numbers, lens identifiers and the maker-note/EXIF version tags. Nothing
//! else: no embedded thumbnail or preview image, no dates, no exposure data.
//! Everything the re-encode step wrote stays as it was.
//!
//! ## Tooling
//!
//! The copy is done by ExifTool:
//!
//! ```text
//! exiftool -TagsFromFile template.jpg -Make -Model ... -overwrite_original DSCF0001.JPG
//! ```
//!
//! `-overwrite_original` edits the output in place without leaving a
//! `DSCF0001.JPG_original` backup behind.
//!
//! ## Missing template
//!
//! The template is checked at startup. If it disappears afterwards, the copy
//! is skipped with a warning instead of failing the image; the output is a
//! valid JPEG but the printer may refuse it.

use crate::command::{CommandError, path_arg, run_checked};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Default program name for ExifTool.
pub const DEFAULT_PROGRAM: &str = "exiftool";

/// Tags copied from the template onto every output.
pub const COPIED_TAGS: &[&str] = &[
    "Make",
    "Model",
    "Software",
    "InternalSerialNumber",
    "SerialNumber",
    "LensMake",
    "LensModel",
    "LensSerialNumber",
    "FujiFilmVersion",
    "ExifVersion",
];

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result of [`copy_reference_metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOutcome {
    Copied,
    SkippedMissingReference,
}

/// A tool that can copy named tags between files.
pub trait MetadataTool {
    /// Copy `tags` from `reference` onto `target`, rewriting `target` in place.
    fn copy_tags(&self, reference: &Path, target: &Path, tags: &[&str])
    -> Result<(), MetadataError>;
}

/// ExifTool command-line wrapper.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: String,
}

impl ExifTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

/// Build the ExifTool argument list for a tag copy.
pub fn copy_args(reference: &Path, target: &Path, tags: &[&str]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-TagsFromFile".into(), path_arg(reference)];
    args.extend(tags.iter().map(|tag| OsString::from(format!("-{tag}"))));
    args.push("-overwrite_original".into());
    args.push(path_arg(target));
    args
}

impl MetadataTool for ExifTool {
    fn copy_tags(
        &self,
        reference: &Path,
        target: &Path,
        tags: &[&str],
    ) -> Result<(), MetadataError> {
        run_checked(Command::new(&self.program).args(copy_args(reference, target, tags)))?;
        Ok(())
    }
}

/// Stamp `target` with the allow-listed tags from `reference`.
///
/// A missing reference is not an error: a warning is logged and `target` is
/// left untouched.
pub fn copy_reference_metadata(
    tool: &impl MetadataTool,
    reference: &Path,
    target: &Path,
    tags: &[&str],
) -> Result<MetadataOutcome, MetadataError> {
    if !reference.exists() {
        tracing::warn!(
            reference = %reference.display(),
            target = %target.display(),
            "template missing, skipping metadata copy"
        );
        return Ok(MetadataOutcome::SkippedMissingReference);
    }
    tool.copy_tags(reference, target, tags)?;
    Ok(MetadataOutcome::Copied)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::test_helpers::{
        exiftool_available, magick_available, read_exif_tag, write_test_image,
    };
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records copy requests instead of running ExifTool.
    #[derive(Default)]
    pub struct MockMetadataTool {
        pub copies: Mutex<Vec<(PathBuf, PathBuf, Vec<String>)>>,
        pub failing: Mutex<Vec<PathBuf>>,
    }

    impl MockMetadataTool {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make `copy_tags` fail for this target path.
        pub fn fail_on(&self, target: &Path) {
            self.failing.lock().unwrap().push(target.to_path_buf());
        }

        pub fn copied_targets(&self) -> Vec<PathBuf> {
            self.copies
                .lock()
                .unwrap()
                .iter()
                .map(|(_, target, _)| target.clone())
                .collect()
        }
    }

    impl MetadataTool for MockMetadataTool {
        fn copy_tags(
            &self,
            reference: &Path,
            target: &Path,
            tags: &[&str],
        ) -> Result<(), MetadataError> {
            if self.failing.lock().unwrap().iter().any(|p| p == target) {
                return Err(CommandError::Failed {
                    program: "exiftool".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "mock failure".to_string(),
                }
                .into());
            }
            self.copies.lock().unwrap().push((
                reference.to_path_buf(),
                target.to_path_buf(),
                tags.iter().map(|t| t.to_string()).collect(),
            ));
            Ok(())
        }
    }

    #[test]
    fn allow_list_is_exact() {
        assert_eq!(COPIED_TAGS.len(), 10);
        for tag in ["Make", "Model", "FujiFilmVersion", "ExifVersion"] {
            assert!(COPIED_TAGS.contains(&tag), "missing {tag}");
        }
        assert!(!COPIED_TAGS.contains(&"ThumbnailImage"));
        assert!(!COPIED_TAGS.contains(&"PreviewImage"));
    }

    #[test]
    fn copy_args_list_each_tag_then_overwrite() {
        let args: Vec<String> = copy_args(
            Path::new("template.jpg"),
            Path::new("out/DSCF0001.JPG"),
            &["Make", "Model"],
        )
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
        assert_eq!(
            args,
            [
                "-TagsFromFile",
                "./template.jpg",
                "-Make",
                "-Model",
                "-overwrite_original",
                "./out/DSCF0001.JPG"
            ]
        );
    }

    #[test]
    fn copy_args_keep_dash_named_target_a_file() {
        let args = copy_args(
            Path::new("/opt/template.jpg"),
            Path::new("-DSCF0001.JPG"),
            &["Make"],
        );
        assert_eq!(args[1], "/opt/template.jpg");
        assert_eq!(args.last().unwrap(), "./-DSCF0001.JPG");
    }

    #[test]
    fn missing_reference_skips_without_calling_tool() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("DSCF0001.JPG");
        std::fs::write(&target, b"jpeg").unwrap();
        let tool = MockMetadataTool::new();

        let outcome = copy_reference_metadata(
            &tool,
            &tmp.path().join("gone.jpg"),
            &target,
            COPIED_TAGS,
        )
        .unwrap();

        assert_eq!(outcome, MetadataOutcome::SkippedMissingReference);
        assert!(tool.copied_targets().is_empty());
        assert_eq!(std::fs::read(&target).unwrap(), b"jpeg");
    }

    #[test]
    fn present_reference_copies_allow_list() {
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("template.jpg");
        let target = tmp.path().join("DSCF0001.JPG");
        std::fs::write(&reference, b"ref").unwrap();
        let tool = MockMetadataTool::new();

        let outcome = copy_reference_metadata(&tool, &reference, &target, COPIED_TAGS).unwrap();

        assert_eq!(outcome, MetadataOutcome::Copied);
        let copies = tool.copies.lock().unwrap();
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].0, reference);
        assert_eq!(copies[0].2, COPIED_TAGS);
    }

    #[test]
    fn tool_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("template.jpg");
        let target = tmp.path().join("DSCF0001.JPG");
        std::fs::write(&reference, b"ref").unwrap();
        let tool = MockMetadataTool::new();
        tool.fail_on(&target);

        let result = copy_reference_metadata(&tool, &reference, &target, COPIED_TAGS);
        assert!(matches!(result, Err(MetadataError::Command(_))));
    }

    // =========================================================================
    // ExifTool integration tests (require ExifTool + ImageMagick)
    // =========================================================================

    /// Write a JPEG via ImageMagick and tag it with ExifTool.
    fn tagged_jpeg(path: &Path, model: &str, artist: &str) {
        write_test_image(&path.with_extension("png"), 64, 48);
        let status = Command::new("magick")
            .arg(path.with_extension("png"))
            .arg(path)
            .status()
            .unwrap();
        assert!(status.success());
        let status = Command::new("exiftool")
            .args([
                "-Make=FUJIFILM".to_string(),
                format!("-Model={model}"),
                format!("-Artist={artist}"),
                "-overwrite_original".to_string(),
            ])
            .arg(path)
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[test]
    #[ignore] // Requires ExifTool and ImageMagick
    fn exiftool_copies_model_and_leaves_other_tags() {
        assert!(exiftool_available() && magick_available(), "tools not on PATH");
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("template.jpg");
        let target = tmp.path().join("DSCF0001.JPG");
        tagged_jpeg(&reference, "X-T5", "Template Author");
        tagged_jpeg(&target, "Pixel 8", "Photo Author");

        let tool = ExifTool::default();
        copy_reference_metadata(&tool, &reference, &target, COPIED_TAGS).unwrap();

        assert_eq!(read_exif_tag(&target, "Model").as_deref(), Some("X-T5"));
        // Artist is not allow-listed
        assert_eq!(
            read_exif_tag(&target, "Artist").as_deref(),
            Some("Photo Author")
        );
        // Edited in place, no backup
        assert!(!tmp.path().join("DSCF0001.JPG_original").exists());
        assert!(image::open(&target).is_ok());
    }
}
