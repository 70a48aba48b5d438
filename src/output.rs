//! CLI output formatting.
//!
//! Each stage has a `format_*` function returning `Vec<String>` for
//! testability, and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Source: matthew_henry_extracted (MHC#####.HTM, books 40-66)
//! Found 4 files
//!
//! Selected
//! 001 Matthew (introduction)
//!     Source: MHC40000.HTM
//! 002 Matthew 1
//!     Source: MHC40001.HTM
//!
//! Out of range
//!     MHC01001.HTM (book 01)
//!
//! Unrecognized
//!     index.html
//! ```
//!
//! ## Convert
//!
//! ```text
//! Found 27 files
//! Processing MHC40000.HTM...
//!     skipped: introduction (chapter 000)
//! Processing MHC40001.HTM...
//!
//! Extracted 9 commentary entries
//! Saved to mhc_new_testament_sample.json
//!
//! Sample entry:
//! {
//!   "reference": "Matthew 1",
//!   ...
//! }
//! ```

use crate::catalog::{self, BookRange};
use crate::convert::{ConvertEvent, ConvertResult};
use crate::naming::ChapterRef;
use crate::scan::ScanReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

/// What a chapter is called in listings, whether or not it will yield a record.
fn chapter_title(chapter: ChapterRef) -> String {
    match catalog::book_name(chapter.book) {
        Some(name) if chapter.is_intro() => format!("{name} (introduction)"),
        Some(name) => format!("{name} {}", chapter.chapter),
        None => format!("Book {:02} chapter {} (not in catalog)", chapter.book, chapter.chapter),
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(
    report: &ScanReport,
    root: &Path,
    pattern: &str,
    books: BookRange,
) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Source: {} ({}, books {:02}-{:02})",
            root.display(),
            pattern,
            books.first,
            books.last
        ),
        format!("Found {}", plural(report.found(), "file", "files")),
    ];

    if !report.selected.is_empty() {
        lines.push(String::new());
        lines.push("Selected".to_string());
        for (i, file) in report.selected.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), chapter_title(file.chapter)));
            lines.push(format!("{}Source: {}", indent(1), file.file_name));
        }
    }

    if !report.beyond_limit.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Beyond limit ({} not converted)",
            report.beyond_limit.len()
        ));
        for file in &report.beyond_limit {
            lines.push(format!("{}{}", indent(1), file.file_name));
        }
    }

    if !report.out_of_range.is_empty() {
        lines.push(String::new());
        lines.push("Out of range".to_string());
        for file in &report.out_of_range {
            lines.push(format!(
                "{}{} (book {:02})",
                indent(1),
                file.file_name,
                file.chapter.book
            ));
        }
    }

    if !report.unrecognized.is_empty() {
        lines.push(String::new());
        lines.push("Unrecognized".to_string());
        for path in &report.unrecognized {
            let shown = path.strip_prefix(root).unwrap_or(path);
            lines.push(format!("{}{}", indent(1), shown.display()));
        }
    }

    lines
}

pub fn print_scan_output(report: &ScanReport, root: &Path, pattern: &str, books: BookRange) {
    for line in format_scan_output(report, root, pattern, books) {
        println!("{}", line);
    }
}

// ============================================================================
// Convert
// ============================================================================

pub fn format_convert_header(report: &ScanReport) -> Vec<String> {
    let mut lines = vec![format!("Found {}", plural(report.found(), "file", "files"))];
    if !report.beyond_limit.is_empty() {
        lines.push(format!(
            "Converting the first {} (limit reached)",
            report.selected.len()
        ));
    }
    lines
}

/// Format a per-file progress event.
pub fn format_convert_event(event: &ConvertEvent) -> Vec<String> {
    match event {
        ConvertEvent::FileConverted {
            file_name, skipped, ..
        } => {
            let mut lines = vec![format!("Processing {}...", file_name)];
            if let Some(reason) = skipped {
                lines.push(format!("{}skipped: {}", indent(1), reason));
            }
            lines
        }
        ConvertEvent::FileFailed { file_name, error } => vec![
            format!("Processing {}...", file_name),
            format!("{}failed: {}", indent(1), error),
        ],
    }
}

/// Closing summary: record count, output path, and the first record.
pub fn format_convert_summary(result: &ConvertResult, output_path: &Path) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Extracted {}",
            plural(result.records.len(), "commentary entry", "commentary entries")
        ),
    ];
    if !result.failed.is_empty() {
        lines.push(format!(
            "Left out {} that could not be read",
            plural(result.failed.len(), "file", "files")
        ));
    }
    lines.push(format!("Saved to {}", output_path.display()));

    if let Some(first) = result.records.first() {
        lines.push(String::new());
        lines.push("Sample entry:".to_string());
        let sample = serde_json::to_string_pretty(first).unwrap_or_default();
        lines.extend(sample.lines().map(str::to_string));
    }
    lines
}

pub fn print_convert_summary(result: &ConvertResult, output_path: &Path) {
    for line in format_convert_summary(result, output_path) {
        println!("{}", line);
    }
}
