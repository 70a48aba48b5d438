//! Source discovery and selection.
//!
//! Stage 1 of a conversion. Walks the input directory, resolves every file
//! name against the naming convention, keeps the files whose book number
//! falls inside the configured range, sorts them by file name, and applies
//! the optional sampling limit.
//!
//! ```text
//! matthew_henry_extracted/
//! ├── MHC01001.HTM      # Genesis 1       → out of range (1 ∉ 40..=66)
//! ├── MHC40000.HTM      # Matthew intro   → selected (yields no record later)
//! ├── MHC40001.HTM      # Matthew 1       → selected
//! ├── MHC45003.htm      # Romans 3        → selected (extension case ignored)
//! ├── index.html        #                 → unrecognized
//! └── .DS_Store         # hidden          → ignored
//! ```
//!
//! Nothing here reads file contents. Chapter-0 and uncatalogued files are
//! still selected and count towards the sampling limit;
//! [`crate::record::extract_records`] decides they produce nothing.

use crate::catalog::BookRange;
use crate::config::ConvertConfig;
use crate::naming::{ChapterRef, FilenamePattern};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source directory not found: {}", .0.display())]
    MissingSource(PathBuf),
}

/// Selection settings for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub pattern: FilenamePattern,
    pub books: BookRange,
    pub limit: Option<usize>,
    pub recursive: bool,
}

impl ScanOptions {
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            pattern: config.input.pattern(),
            books: config.selection.books,
            limit: config.selection.limit,
            recursive: config.input.recursive,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from_config(&ConvertConfig::default())
    }
}

/// A file whose name resolved to a book and chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub chapter: ChapterRef,
}

/// Outcome of a scan: what will be converted and what was passed over.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Files to convert, in file-name order.
    pub selected: Vec<SourceFile>,
    /// In-range files dropped by the sampling limit.
    pub beyond_limit: Vec<SourceFile>,
    /// Resolved files whose book lies outside the range.
    pub out_of_range: Vec<SourceFile>,
    /// Files whose names don't follow the convention.
    pub unrecognized: Vec<PathBuf>,
}

impl ScanReport {
    /// In-range files found, before the sampling limit.
    pub fn found(&self) -> usize {
        self.selected.len() + self.beyond_limit.len()
    }
}

pub fn scan(root: &Path, options: &ScanOptions) -> Result<ScanReport, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingSource(root.to_path_buf()));
    }

    let mut report = ScanReport::default();
    let mut in_range = Vec::new();

    for path in collect_files(root, options.recursive)? {
        let chapter = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| options.pattern.resolve(n).map(|c| (n.to_string(), c)));

        let Some((file_name, chapter)) = chapter else {
            tracing::debug!(path = %path.display(), "skipping unrecognized file name");
            report.unrecognized.push(path);
            continue;
        };

        let source = SourceFile {
            path,
            file_name,
            chapter,
        };
        if options.books.contains(chapter.book) {
            in_range.push(source);
        } else {
            tracing::debug!(file = %source.file_name, book = chapter.book, "book outside selection");
            report.out_of_range.push(source);
        }
    }

    in_range.sort_by(|a, b| (&a.file_name, &a.path).cmp(&(&b.file_name, &b.path)));
    report.out_of_range.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let keep = options.limit.unwrap_or(usize::MAX).min(in_range.len());
    report.beyond_limit = in_range.split_off(keep);
    report.selected = in_range;

    tracing::info!(
        root = %root.display(),
        found = report.found(),
        selected = report.selected.len(),
        "scan complete"
    );
    Ok(report)
}

/// Regular files under `root`, skipping hidden entries.
fn collect_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        // The root itself passes through the filter too.
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn fixtures_are_classified() {
        let tmp = setup_fixtures();
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();

        assert_eq!(
            names(&report.selected),
            vec!["MHC40000.HTM", "MHC40001.HTM", "MHC45003.HTM", "MHC66022.htm"]
        );
        assert_eq!(names(&report.out_of_range), vec!["MHC01001.HTM", "MHC99001.HTM"]);
        assert_eq!(report.unrecognized.len(), 2);
        assert!(report.beyond_limit.is_empty());
        assert_eq!(report.found(), 4);
    }

    #[test]
    fn selected_files_carry_chapter_refs() {
        let tmp = setup_fixtures();
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
        let romans = find_source(&report, "MHC45003.HTM");
        assert_eq!(romans.chapter, ChapterRef { book: 45, chapter: 3 });
        assert_eq!(romans.path, tmp.path().join("MHC45003.HTM"));
    }

    #[test]
    fn hidden_files_are_ignored() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join(".MHC41001.HTM"), "<p>hidden</p>").unwrap();
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert!(!names(&report.selected).contains(&".MHC41001.HTM"));
        assert!(report.unrecognized.iter().all(|p| !p.ends_with(".MHC41001.HTM")));
    }

    #[test]
    fn sample_limit_keeps_first_ten_of_twenty_seven() {
        let tmp = TempDir::new().unwrap();
        write_new_testament(tmp.path());
        let options = ScanOptions {
            limit: Some(10),
            ..Default::default()
        };
        let report = scan(tmp.path(), &options).unwrap();

        assert_eq!(report.found(), 27);
        assert_eq!(report.selected.len(), 10);
        assert_eq!(report.beyond_limit.len(), 17);
        let books: Vec<u8> = report.selected.iter().map(|f| f.chapter.book).collect();
        assert_eq!(books, (40..50).collect::<Vec<u8>>());
        assert_eq!(report.beyond_limit[0].file_name, "MHC50001.HTM");
    }

    #[test]
    fn no_limit_keeps_everything() {
        let tmp = TempDir::new().unwrap();
        write_new_testament(tmp.path());
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(report.selected.len(), 27);
        assert!(report.beyond_limit.is_empty());
    }

    #[test]
    fn limit_larger_than_found() {
        let tmp = setup_fixtures();
        let options = ScanOptions {
            limit: Some(100),
            ..Default::default()
        };
        let report = scan(tmp.path(), &options).unwrap();
        assert_eq!(report.selected.len(), 4);
    }

    #[test]
    fn book_range_filters() {
        let tmp = TempDir::new().unwrap();
        write_new_testament(tmp.path());
        let options = ScanOptions {
            books: BookRange { first: 45, last: 46 },
            ..Default::default()
        };
        let report = scan(tmp.path(), &options).unwrap();
        assert_eq!(names(&report.selected), vec!["MHC45001.HTM", "MHC46001.HTM"]);
        assert_eq!(report.out_of_range.len(), 25);
    }

    #[test]
    fn sorted_by_file_name_regardless_of_creation_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["MHC45002.HTM", "MHC40010.HTM", "MHC45001.HTM", "MHC40002.HTM"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(
            names(&report.selected),
            vec!["MHC40002.HTM", "MHC40010.HTM", "MHC45001.HTM", "MHC45002.HTM"]
        );
    }

    #[test]
    fn subdirectories_only_when_recursive() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("vol6")).unwrap();
        fs::write(tmp.path().join("vol6/MHC43001.HTM"), "x").unwrap();
        fs::write(tmp.path().join("MHC42001.HTM"), "x").unwrap();

        let flat = scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(names(&flat.selected), vec!["MHC42001.HTM"]);

        let options = ScanOptions {
            recursive: true,
            ..Default::default()
        };
        let deep = scan(tmp.path(), &options).unwrap();
        assert_eq!(names(&deep.selected), vec!["MHC42001.HTM", "MHC43001.HTM"]);
    }

    #[test]
    fn directories_named_like_files_are_not_selected() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("MHC40001.HTM")).unwrap();
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert!(report.selected.is_empty());
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = scan(&tmp.path().join("nope"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::MissingSource(_)));
    }

    #[test]
    fn empty_directory_selects_nothing() {
        let tmp = TempDir::new().unwrap();
        let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(report.found(), 0);
        assert!(report.unrecognized.is_empty());
    }

    #[test]
    fn custom_pattern_from_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("JFB43001.html"), "x").unwrap();
        fs::write(tmp.path().join("MHC43001.HTM"), "x").unwrap();
        let mut config = ConvertConfig::default();
        config.input.prefix = "JFB".into();
        config.input.extension = "html".into();
        let report = scan(tmp.path(), &ScanOptions::from_config(&config)).unwrap();
        assert_eq!(names(&report.selected), vec!["JFB43001.html"]);
        assert_eq!(report.unrecognized.len(), 1);
    }
}
