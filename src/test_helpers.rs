//! Shared test utilities for the wide-evo test suite.
//!
//! Fixture images are generated on the fly with the `image` crate, so the
//! suite needs no binary fixtures checked in. Tests that run the real
//! ImageMagick or ExifTool are `#[ignore]`d and use the `*_available`
//! probes to fail with a clear message when a tool is missing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let photo = tmp.path().join("wide.png");
//! write_test_image(&photo, 2000, 1000);
//! ```

use std::path::Path;
use std::process::{Command, Stdio};

// =========================================================================
// Tool probes
// =========================================================================

fn tool_runs(program: &str, version_arg: &str) -> bool {
    Command::new(program)
        .arg(version_arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// `magick -version` succeeds.
pub fn magick_available() -> bool {
    tool_runs("magick", "-version")
}

/// `exiftool -ver` succeeds.
pub fn exiftool_available() -> bool {
    tool_runs("exiftool", "-ver")
}

/// Printed value of one tag (`exiftool -s3 -<tag>`), `None` if absent.
pub fn read_exif_tag(path: &Path, tag: &str) -> Option<String> {
    let output = Command::new("exiftool")
        .arg("-s3")
        .arg(format!("-{tag}"))
        .arg(path)
        .output()
        .unwrap();
    assert!(output.status.success(), "exiftool failed on {}", path.display());
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Some(value).filter(|v| !v.is_empty())
}

// =========================================================================
// Fixture images
// =========================================================================

/// Write a `width` x `height` gradient image. Format follows the extension.
pub fn write_test_image(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

/// Write a small JPEG that looks like it came from a Fujifilm `model`.
///
/// Requires ImageMagick and ExifTool.
pub fn write_test_template(path: &Path, model: &str) {
    let png = path.with_extension("png");
    write_test_image(&png, 64, 48);
    let status = Command::new("magick").arg(&png).arg(path).status().unwrap();
    assert!(status.success(), "magick could not write {}", path.display());
    let status = Command::new("exiftool")
        .arg("-Make=FUJIFILM")
        .arg(format!("-Model={model}"))
        .arg("-overwrite_original")
        .arg(path)
        .status()
        .unwrap();
    assert!(status.success(), "exiftool could not tag {}", path.display());
}
