//! Shared test utilities.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let report = scan(tmp.path(), &ScanOptions::default()).unwrap();
//! let romans = find_source(&report, "MHC45003.HTM");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::NEW_TESTAMENT;
use crate::record::CommentaryRecord;
use crate::scan::{ScanReport, SourceFile};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/commentary/` to a temp directory and return it.
///
/// The fixture set:
///
/// | File | Expectation |
/// |------|-------------|
/// | `MHC01001.HTM` | Genesis 1, outside the New Testament range |
/// | `MHC40000.HTM` | Matthew introduction, selected but yields no record |
/// | `MHC40001.HTM` | Matthew 1 |
/// | `MHC45003.HTM` | Romans 3 |
/// | `MHC66022.htm` | Revelation 22, lowercase extension |
/// | `MHC99001.HTM` | book 99, outside range and catalog |
/// | `index.html`, `README.txt` | unrecognized |
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/commentary");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// Write chapter 1 of every New Testament book (27 files) into `dir`.
pub fn write_new_testament(dir: &Path) {
    for &(book, name) in NEW_TESTAMENT.iter() {
        let html = format!("<html><body><h1>{name}</h1><p>Chapter one of {name}.</p></body></html>");
        std::fs::write(dir.join(format!("MHC{book:02}001.HTM")), html).unwrap();
    }
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a selected source file by name. Panics if not found.
pub fn find_source<'a>(report: &'a ScanReport, file_name: &str) -> &'a SourceFile {
    report
        .selected
        .iter()
        .find(|f| f.file_name == file_name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = report.selected.iter().map(|f| f.file_name.as_str()).collect();
            panic!("source '{file_name}' not selected. Selected: {names:?}")
        })
}

/// Find a record by reference. Panics if not found.
pub fn find_record<'a>(records: &'a [CommentaryRecord], reference: &str) -> &'a CommentaryRecord {
    records
        .iter()
        .find(|r| r.reference == reference)
        .unwrap_or_else(|| {
            let refs: Vec<&str> = records.iter().map(|r| r.reference.as_str()).collect();
            panic!("record '{reference}' not found. Available: {refs:?}")
        })
}

/// References of all records, in order.
pub fn references(records: &[CommentaryRecord]) -> Vec<&str> {
    records.iter().map(|r| r.reference.as_str()).collect()
}
