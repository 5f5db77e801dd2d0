//! Camera-style output file names.
//!
//! Outputs are named like files straight off a Fujifilm camera:
//! `DSCF` + a 4-digit zero-padded index + `.JPG`. The printer app uses the
//! name as part of its camera check, so the width and the uppercase
//! extension are fixed. The prefix and the first index come from
//! [`NameScheme`].
//!
//! ```text
//! DSCF0001.JPG
//! DSCF0002.JPG
//! ...
//! DSCF9999.JPG
//! ```
//!
//! ## Gap filling
//!
//! [`NameScheme::next_output_path`] returns the *lowest* unused index at or
//! above the start index, so deleting `DSCF0002.JPG` from a directory
//! holding 0001–0003 makes the next run write `DSCF0002.JPG` again.
//!
//! ## Concurrency
//!
//! The lookup is check-then-act: the name is free when checked but nothing
//! reserves it until the image is written. Two processes writing into the
//! same directory can pick the same name and overwrite each other. Runs are
//! sequential within one process, so this only matters across processes.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name prefix used by Fujifilm cameras.
pub const DEFAULT_PREFIX: &str = "DSCF";

/// Output extension, always uppercase.
pub const EXTENSION: &str = "JPG";

/// Highest index that fits the 4-digit field.
pub const MAX_INDEX: u32 = 9999;

#[derive(Error, Debug)]
pub enum NamingError {
    #[error("no free {prefix}NNNN.JPG name left in {}", .dir.display())]
    Exhausted { dir: PathBuf, prefix: String },
}

/// Prefix and first index of the output sequence.
///
/// The default, `DSCF` from 1, matches a Fujifilm card. Other camera
/// prefixes the printer app accepts can be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameScheme {
    pub prefix: String,
    pub start_index: u32,
}

impl Default for NameScheme {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            start_index: 1,
        }
    }
}

impl NameScheme {
    pub fn new(prefix: impl Into<String>, start_index: u32) -> Self {
        Self {
            prefix: prefix.into(),
            start_index,
        }
    }

    /// Format the output name for `index` (`7` → `DSCF0007.JPG`).
    pub fn format(&self, index: u32) -> String {
        format!("{}{index:04}.{EXTENSION}", self.prefix)
    }

    /// Return the first free output path in `dir`, starting at
    /// `start_index`.
    ///
    /// `dir` must already exist. See the [module docs](self) for the race
    /// this leaves open between concurrent writers.
    pub fn next_output_path(&self, dir: &Path) -> Result<PathBuf, NamingError> {
        (self.start_index.max(1)..=MAX_INDEX)
            .map(|index| dir.join(self.format(index)))
            .find(|path| !path.exists())
            .ok_or_else(|| NamingError::Exhausted {
                dir: dir.to_path_buf(),
                prefix: self.prefix.clone(),
            })
    }
}

/// Whether `prefix` can be used as a file name prefix on every platform.
pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
