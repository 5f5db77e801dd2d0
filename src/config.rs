//! Run configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. stock defaults (below),
//! 2. an optional TOML file passed with `--config`,
//! 3. command-line flags (`--template`).
//!
//! The merged result is a [`Settings`] value built once in `main` and handed
//! by reference to everything that needs it. Nothing reads configuration
//! from globals.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Reference photo whose camera tags are copied onto every output.
//! # Relative paths are resolved against this file's directory.
//! # Default: template.jpg next to the wide-evo executable.
//! # template = "template.jpg"
//!
//! quality = 95              # JPEG quality (1-100)
//!
//! [naming]
//! prefix = "DSCF"           # output names: DSCF0001.JPG, DSCF0002.JPG, ...
//! start_index = 1           # lowest sequence number used
//!
//! [tools]
//! magick = "magick"         # ImageMagick 7 entry point
//! exiftool = "exiftool"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use crate::imaging::magick_backend;
use crate::metadata::{self, COPIED_TAGS};
use crate::naming::{self, MAX_INDEX, NameScheme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the bundled reference photo.
pub const TEMPLATE_FILENAME: &str = "template.jpg";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of a config file.
///
/// All fields have defaults; a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reference photo; `None` means the one bundled with the executable.
    pub template: Option<PathBuf>,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Output file names.
    pub naming: NamingConfig,
    /// External programs.
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: None,
            quality: 95,
            naming: NamingConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Output sequence: `<prefix><4-digit index>.JPG`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub prefix: String,
    pub start_index: u32,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let scheme = NameScheme::default();
        Self {
            prefix: scheme.prefix,
            start_index: scheme.start_index,
        }
    }
}

/// Names or paths of the external programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub magick: String,
    pub exiftool: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            magick: magick_backend::DEFAULT_PROGRAM.to_string(),
            exiftool: metadata::DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if !naming::is_valid_prefix(&self.naming.prefix) {
            return Err(ConfigError::Validation(
                "naming.prefix must be non-empty ASCII letters, digits, '_' or '-'".into(),
            ));
        }
        if !(1..=MAX_INDEX).contains(&self.naming.start_index) {
            return Err(ConfigError::Validation(format!(
                "naming.start_index must be 1-{MAX_INDEX}"
            )));
        }
        if self.tools.magick.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tools.magick must not be empty".into(),
            ));
        }
        if self.tools.exiftool.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tools.exiftool must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Merge in command-line overrides and freeze into [`Settings`].
    pub fn into_settings(self, template_override: Option<PathBuf>) -> Result<Settings, ConfigError> {
        let template = match template_override.or(self.template) {
            Some(path) => path,
            None => default_template_path()?,
        };
        Ok(Settings {
            magick: self.tools.magick,
            exiftool: self.tools.exiftool,
            template,
            quality: Quality::new(self.quality),
            naming: NameScheme::new(self.naming.prefix, self.naming.start_index),
            tags: COPIED_TAGS,
        })
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub magick: String,
    pub exiftool: String,
    /// Reference photo for the metadata copy.
    pub template: PathBuf,
    pub quality: Quality,
    pub naming: NameScheme,
    /// Tag allow-list; always [`COPIED_TAGS`].
    pub tags: &'static [&'static str],
}

impl Default for Settings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            magick: config.tools.magick,
            exiftool: config.tools.exiftool,
            template: PathBuf::from(TEMPLATE_FILENAME),
            quality: Quality::new(config.quality),
            naming: NameScheme::default(),
            tags: COPIED_TAGS,
        }
    }
}

/// `template.jpg` in the directory holding the running executable.
pub fn default_template_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(TEMPLATE_FILENAME))
}

/// Load and validate a config file.
///
/// A relative `template` is resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.validate()?;
    if let Some(template) = config.template.take() {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.template = Some(base.join(template));
    }
    Ok(config)
}

/// Load the config file if one was given, otherwise use stock defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

/// Returns a fully-commented stock config file.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# wide-evo configuration
# =======================
# Pass with: wide-evo --config wide-evo.toml photo.png
# All options are optional. Values shown are the defaults.

# Reference photo whose camera tags (Make, Model, serial numbers, lens,
# FujiFilmVersion, ExifVersion) are copied onto every output. Use a JPEG
# taken with a camera your printer accepts.
# Relative paths are resolved against this file's directory.
# Default: template.jpg next to the wide-evo executable.
# template = "template.jpg"

# JPEG quality for the re-encoded output (1-100).
quality = 95

[naming]
# Output file names are <prefix><4-digit index>.JPG. Keep the prefix of the
# camera the template photo came from (Fujifilm uses DSCF).
prefix = "DSCF"
# Lowest index used. Free slots below it are never filled.
start_index = 1

[tools]
# ImageMagick 7 entry point. Used for identify, crop and re-encode.
magick = "magick"
# ExifTool. Used to copy camera tags from the template.
exiftool = "exiftool"
"##
}
