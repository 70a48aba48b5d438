//! Commentary records: the unit of JSON output.
//!
//! One record per chapter. [`extract_records`] is the per-file entry point:
//! it applies the skip rules, cleans the text, and assembles the record.
//! It returns a `Vec` rather than an `Option` so that finer-grained
//! extraction (one record per verse group) can slot in later without
//! changing callers.

use crate::catalog;
use crate::naming::ChapterRef;
use crate::normalize;
use serde::{Deserialize, Serialize};

pub const TRADITION: &str = "reformed";
pub const AUTHOR: &str = "Matthew Henry";
pub const SOURCE: &str = "Commentary on the Whole Bible";
pub const YEAR: u16 = 1706;

/// Default cap on `text`, in characters.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// A single chapter's commentary, ready for serialization.
///
/// Field order here is the field order in the output JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryRecord {
    /// `"<book name> <chapter>"`, e.g. `"Romans 3"`.
    pub reference: String,
    pub tradition: String,
    pub author: String,
    pub source: String,
    pub year: u16,
    pub text: String,
}

/// Knobs for turning a file into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub max_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Why a resolved file produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// File name didn't follow the naming convention.
    Unrecognized,
    /// Book number isn't in the catalog.
    UnknownBook(u8),
    /// Chapter `000`, the book introduction.
    Intro,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Unrecognized => write!(f, "unrecognized file name"),
            SkipReason::UnknownBook(n) => write!(f, "book {n:02} not in catalog"),
            SkipReason::Intro => write!(f, "introduction (chapter 000)"),
        }
    }
}

/// Decide whether a resolved file yields commentary at all.
///
/// Returns the catalogued book name when it does.
pub fn check_chapter(chapter: Option<ChapterRef>) -> Result<(&'static str, ChapterRef), SkipReason> {
    let chapter = chapter.ok_or(SkipReason::Unrecognized)?;
    let name = catalog::book_name(chapter.book).ok_or(SkipReason::UnknownBook(chapter.book))?;
    if chapter.is_intro() {
        return Err(SkipReason::Intro);
    }
    Ok((name, chapter))
}

/// Build a record from already-cleaned text, truncating it to `max_chars`.
pub fn assemble(book_name: &str, chapter: u16, text: &str, max_chars: usize) -> CommentaryRecord {
    CommentaryRecord {
        reference: format!("{book_name} {chapter}"),
        tradition: TRADITION.to_string(),
        author: AUTHOR.to_string(),
        source: SOURCE.to_string(),
        year: YEAR,
        text: normalize::truncate_chars(text, max_chars).to_string(),
    }
}

/// Turn one file's contents into zero or one records.
///
/// Empty when the name didn't resolve, the book is not catalogued, or the
/// file is a book introduction. None of those are errors.
pub fn extract_records(
    html: &str,
    chapter: Option<ChapterRef>,
    options: &ExtractOptions,
) -> Vec<CommentaryRecord> {
    let Ok((book_name, chapter)) = check_chapter(chapter) else {
        return Vec::new();
    };
    let text = normalize::clean_text(html);
    vec![assemble(book_name, chapter.chapter, &text, options.max_chars)]
}
