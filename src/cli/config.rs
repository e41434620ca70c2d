//! TOML configuration file support for repeated imports.
//!
//! Instead of passing the same flags for every recording of a session, users can
//! keep them in a config file:
//!
//! ```toml
//! # eegdoc.toml
//! [import]
//! sample_rate = 256.0
//! subject = "S01"
//! epoch_length = 128
//!
//! [codec]
//! compression_level = 9
//! decimals = 3
//! ```
//!
//! Command line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for eegdoc.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Import-specific settings.
    #[serde(default)]
    pub import: ImportConfig,

    /// Encoder settings.
    #[serde(default)]
    pub codec: CodecSettings,
}

/// Configuration for the import command.
#[derive(Debug, Default, Deserialize)]
pub struct ImportConfig {
    /// Sample rate in Hz.
    pub sample_rate: Option<f64>,

    /// Subject description.
    pub subject: Option<String>,

    /// Free-text recording info.
    pub info: Option<String>,

    /// Epoch length in samples.
    pub epoch_length: Option<usize>,
}

/// Encoder configuration.
#[derive(Debug, Default, Deserialize)]
pub struct CodecSettings {
    /// zlib compression level (0-9).
    pub compression_level: Option<u32>,

    /// Store samples rounded to this many decimals.
    pub decimals: Option<u8>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
