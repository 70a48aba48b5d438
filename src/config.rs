//! Converter configuration.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Stock defaults ([`ConvertConfig::default`])
//! 2. An optional TOML file (`mhc-json.toml` unless `--config` says otherwise)
//! 3. Command-line flags, applied by the binary
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [input]
//! dir = "matthew_henry_extracted"
//! prefix = "MHC"
//! extension = "HTM"         # matched case-insensitively
//! recursive = false
//!
//! [output]
//! path = "mhc_new_testament_sample.json"
//!
//! [selection]
//! books = [40, 66]          # inclusive
//! # limit = 10              # omit for no limit
//!
//! [text]
//! max_chars = 2000
//!
//! [processing]
//! # max_processes = 4       # omit for auto = CPU cores
//! on_read_error = "abort"   # or "skip"
//! ```
//!
//! Files are sparse; unknown keys are rejected to catch typos early.

use crate::catalog::BookRange;
use crate::naming::FilenamePattern;
use crate::record::{DEFAULT_MAX_CHARS, ExtractOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "mhc-json.toml";

/// Cap used by `--sample`: the first ten selected files.
pub const SAMPLE_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full converter configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub selection: SelectionConfig,
    pub text: TextConfig,
    pub processing: ProcessingConfig,
}

/// Where to look for commentary files and how they are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Must exist; a missing directory fails the scan.
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
    /// Descend into subdirectories of `dir`.
    pub recursive: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("matthew_henry_extracted"),
            prefix: "MHC".to_string(),
            extension: "HTM".to_string(),
            recursive: false,
        }
    }
}

impl InputConfig {
    pub fn pattern(&self) -> FilenamePattern {
        FilenamePattern::new(&self.prefix, &self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mhc_new_testament_sample.json"),
        }
    }
}

/// Which resolved files make it into a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Inclusive book-number range.
    pub books: BookRange,
    /// Keep only the first `limit` files (by file name) after range filtering.
    /// `None` keeps everything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Truncation cutoff for each record's text, in characters.
    pub max_chars: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl TextConfig {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_chars: self.max_chars,
        }
    }
}

/// What to do when a selected file can't be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Fail the whole batch; nothing is written.
    #[default]
    Abort,
    /// Log the file and carry on without it.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of worker threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
    pub on_read_error: ReadErrorPolicy,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

impl ConvertConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let books = self.selection.books;
        if books.first > books.last {
            return Err(ConfigError::Validation(format!(
                "selection.books start ({}) must not exceed end ({})",
                books.first, books.last
            )));
        }
        if books.last > 99 {
            return Err(ConfigError::Validation(
                "selection.books values must be two-digit book numbers (0-99)".into(),
            ));
        }
        if self.selection.limit == Some(0) {
            return Err(ConfigError::Validation(
                "selection.limit must be positive (omit it for no limit)".into(),
            ));
        }
        if self.text.max_chars == 0 {
            return Err(ConfigError::Validation(
                "text.max_chars must be positive".into(),
            ));
        }
        if self.input.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "input.prefix must not be empty".into(),
            ));
        }
        if self.input.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "input.extension must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be positive".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ConvertConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse TOML text, merge it over the stock defaults, and validate.
pub fn parse_config(content: &str) -> Result<ConvertConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let config: ConvertConfig = merge_toml(stock_defaults_value(), overlay).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a file.
///
/// A missing file is only an error when `required` is set (an explicit
/// `--config`); otherwise stock defaults are used.
pub fn load_config(path: &Path, required: bool) -> Result<ConvertConfig, ConfigError> {
    if !path.exists() && !required {
        return Ok(ConvertConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// A fully-commented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# mhc-json configuration
# ======================
#
# Every key is optional. Values shown are the defaults.

[input]
# Directory holding the extracted commentary HTML files. It must exist:
# a missing directory is an error, not an empty batch.
dir = "matthew_henry_extracted"
# File names look like <prefix><book:2 digits><chapter:3 digits>.<extension>,
# e.g. MHC45003.HTM is Romans chapter 3. Chapter 000 is a book introduction
# and never produces a record.
prefix = "MHC"
# Compared case-insensitively.
extension = "HTM"
# Also look inside subdirectories.
recursive = false

[output]
# JSON array of records, two-space indented, UTF-8 left unescaped.
path = "mhc_new_testament_sample.json"

[selection]
# Inclusive book-number range. 40-66 is the New Testament.
books = [40, 66]
# Convert only the first N selected files (sorted by file name).
# Omit to convert everything. `--sample` sets this to 10.
# limit = 10

[text]
# Record text is cut to this many characters, possibly mid-word.
max_chars = 2000

[processing]
# Worker threads for per-file conversion. Omit for one per CPU core.
# Output order is the same whatever this is set to.
# max_processes = 4
# "abort": any unreadable file fails the batch and nothing is written.
# "skip":  unreadable files are reported and left out.
on_read_error = "abort"
"##
}
