//! File conversion and JSON output.
//!
//! Stage 2 of a conversion. Takes the files selected by [`crate::scan`],
//! reads each one, runs it through [`record::extract_records`], and
//! concatenates the records in selection order.
//!
//! ## Parallel Processing
//!
//! Files are independent, so they are converted in parallel with
//! [rayon](https://docs.rs/rayon). Results are collected back in input
//! order; output is byte-identical whatever the thread count.
//!
//! ## Failure Model
//!
//! Under [`ReadErrorPolicy::Abort`] the first unreadable file (in selection
//! order) fails the batch. Output is only written after every file has been
//! converted, so an aborted batch leaves no partial JSON behind.
//! [`ReadErrorPolicy::Skip`] reports the file and leaves it out instead.
//!
//! Undecodable bytes are never an error: they are dropped.

use crate::config::{ConvertConfig, ReadErrorPolicy};
use crate::normalize::decode_lossy;
use crate::record::{self, CommentaryRecord, ExtractOptions, SkipReason};
use crate::scan::SourceFile;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub extract: ExtractOptions,
    pub on_read_error: ReadErrorPolicy,
}

impl ConvertOptions {
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            extract: config.text.extract_options(),
            on_read_error: config.processing.on_read_error,
        }
    }
}

/// Progress reported while files are converted.
///
/// Events arrive in completion order, which under parallel conversion is
/// not necessarily selection order.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertEvent {
    /// A file was read and run through the pipeline.
    FileConverted {
        file_name: String,
        records: usize,
        skipped: Option<SkipReason>,
    },
    /// A file could not be read and was left out (skip policy only).
    FileFailed { file_name: String, error: String },
}

/// Everything a conversion produced.
#[derive(Debug, Default)]
pub struct ConvertResult {
    pub records: Vec<CommentaryRecord>,
    /// Files that yielded no records, with the reason.
    pub skipped: Vec<(String, SkipReason)>,
    /// Unreadable files left out under the skip policy.
    pub failed: Vec<PathBuf>,
}

/// Read a source file, decoding it as UTF-8 and dropping invalid bytes.
pub fn read_source(path: &Path) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_lossy(&bytes))
}

/// Convert one selected file into its records.
pub fn convert_file(
    file: &SourceFile,
    options: &ExtractOptions,
) -> Result<Vec<CommentaryRecord>, ConvertError> {
    let html = read_source(&file.path)?;
    Ok(record::extract_records(&html, Some(file.chapter), options))
}

pub fn convert(
    files: &[SourceFile],
    options: &ConvertOptions,
    events: Option<Sender<ConvertEvent>>,
) -> Result<ConvertResult, ConvertError> {
    let send = |event: ConvertEvent| {
        if let Some(tx) = &events {
            // Receiver hanging up only silences progress output.
            let _ = tx.send(event);
        }
    };

    let outcomes: Vec<Result<Vec<CommentaryRecord>, ConvertError>> = files
        .par_iter()
        .map(|file| {
            let outcome = convert_file(file, &options.extract);
            match &outcome {
                Ok(records) => send(ConvertEvent::FileConverted {
                    file_name: file.file_name.clone(),
                    records: records.len(),
                    skipped: skip_reason(file, records),
                }),
                Err(e) if options.on_read_error == ReadErrorPolicy::Skip => {
                    send(ConvertEvent::FileFailed {
                        file_name: file.file_name.clone(),
                        error: e.to_string(),
                    })
                }
                Err(_) => {}
            }
            outcome
        })
        .collect();

    let mut result = ConvertResult::default();
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(records) => {
                if let Some(reason) = skip_reason(file, &records) {
                    tracing::debug!(file = %file.file_name, %reason, "no records");
                    result.skipped.push((file.file_name.clone(), reason));
                }
                result.records.extend(records);
            }
            Err(e) => match options.on_read_error {
                ReadErrorPolicy::Abort => return Err(e),
                ReadErrorPolicy::Skip => {
                    tracing::warn!(file = %file.path.display(), error = %e, "skipping unreadable file");
                    result.failed.push(file.path.clone());
                }
            },
        }
    }

    tracing::info!(
        files = files.len(),
        records = result.records.len(),
        "conversion complete"
    );
    Ok(result)
}

fn skip_reason(file: &SourceFile, records: &[CommentaryRecord]) -> Option<SkipReason> {
    if !records.is_empty() {
        return None;
    }
    record::check_chapter(Some(file.chapter)).err()
}

/// Render records as a two-space indented JSON array, non-ASCII unescaped.
pub fn render_json(records: &[CommentaryRecord]) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records to `path`, creating parent directories as needed.
pub fn write_records(path: &Path, records: &[CommentaryRecord]) -> Result<(), ConvertError> {
    let json = render_json(records)?;
    let write_err = |source: std::io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)
}
