//! # WideEvo
//!
//! Turns arbitrary photos into files an instax Wide Link printer accepts.
//! The printer app checks that a photo came from a supported Fujifilm camera,
//! so each output is cropped to the camera's aspect ratio, re-encoded as
//! JPEG, stamped with camera tags copied from a reference photo, and named
//! like a file off the camera's card.
//!
//! # Pipeline
//!
//! Each input goes through the same short sequence, one image at a time:
//!
//! ```text
//! identify (WxH) → ratio decision → crop + re-encode → copy tags → DSCFNNNN.JPG
//!   magick           pure Rust         magick          exiftool      naming
//! ```
//!
//! No image or metadata format is decoded in-process. All pixel work is
//! delegated to ImageMagick and all tag work to ExifTool, both run as
//! blocking subprocesses. The crate's own logic is the ratio math, the
//! naming scheme and the batch bookkeeping, each of which is unit-tested
//! against mock tools.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`deps`] | Startup probe for ImageMagick and ExifTool, with install hints |
//! | [`imaging`] | Dimension query, 4:3 / 3:4 crop geometry, crop + JPEG re-encode |
//! | [`metadata`] | Copies the camera-tag allow-list from the template onto outputs |
//! | [`naming`] | `DSCF0001.JPG` sequence (prefix and start configurable), lowest free index first |
//! | [`process`] | Batch driver: per-image pipeline, skip/fail bookkeeping, progress events |
//! | [`output`] | CLI output formatting for progress lines and the summary |
//! | [`config`] | Optional `--config` TOML file and the frozen run [`config::Settings`] |
//! | [`command`] | Subprocess execution shared by the tool wrappers |
//!
//! # Design Decisions
//!
//! ## External Tools Behind Traits
//!
//! [`imaging::ImageBackend`] and [`metadata::MetadataTool`] are the only
//! seams to the outside world. The batch driver is generic over both, so the
//! whole pipeline (naming, skip handling, failure isolation) runs in tests
//! against recording mocks, with real-tool tests marked `#[ignore]`.
//!
//! ## Explicit Settings
//!
//! The template path, tag allow-list, JPEG quality and tool names are built
//! once into a [`config::Settings`] and passed by reference. Nothing reads
//! configuration from globals or the environment after startup.
//!
//! ## Partial Failure
//!
//! One bad photo never stops the batch. Missing inputs are skipped, failed
//! inputs are reported with their path, and the run exits non-zero only if
//! some existing input failed.

pub mod command;
pub mod config;
pub mod deps;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
