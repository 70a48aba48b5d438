//! Filename parsing for the commentary file naming convention.
//!
//! Every chapter of the commentary ships as one HTML file whose name encodes
//! the book and chapter numbers:
//!
//! ```text
//! MHC45003.HTM
//! ^^^                literal prefix
//!    ^^              book number (2 digits)
//!      ^^^           chapter number (3 digits, 000 = introduction)
//!         ^^^^       extension (case-insensitive)
//! ```
//!
//! Names that don't follow the convention resolve to `None`. That is the
//! normal "not a commentary file" signal, never an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Book and chapter numbers decoded from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterRef {
    pub book: u8,
    pub chapter: u16,
}

impl ChapterRef {
    /// Chapter `000` holds the book's front matter, not commentary.
    pub fn is_intro(&self) -> bool {
        self.chapter == 0
    }
}

impl fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:03}", self.book, self.chapter)
    }
}

/// Compiled `<prefix><book><chapter>.<ext>` matcher.
///
/// The whole file name must match. The prefix is compared literally; the
/// extension ignores ASCII case, so `MHC45003.htm` resolves like `MHC45003.HTM`.
#[derive(Debug, Clone)]
pub struct FilenamePattern {
    prefix: String,
    extension: String,
    regex: Regex,
}

impl FilenamePattern {
    pub fn new(prefix: &str, extension: &str) -> Self {
        let source = format!(
            r"^{}([0-9]{{2}})([0-9]{{3}})\.(?i:{})$",
            regex::escape(prefix),
            regex::escape(extension.trim_start_matches('.'))
        );
        // Both user-supplied parts are escaped, so the pattern is always valid.
        let regex = Regex::new(&source).expect("escaped filename pattern must compile");
        Self {
            prefix: prefix.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
            regex,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Resolve a file name (not a path) to its book/chapter pair.
    pub fn resolve(&self, file_name: &str) -> Option<ChapterRef> {
        let caps = self.regex.captures(file_name)?;
        let book = caps[1].parse().ok()?;
        let chapter = caps[2].parse().ok()?;
        Some(ChapterRef { book, chapter })
    }

    /// Human-readable form of the pattern, e.g. `MHC#####.HTM`.
    pub fn display(&self) -> String {
        format!("{}#####.{}", self.prefix, self.extension)
    }
}

impl Default for FilenamePattern {
    fn default() -> Self {
        Self::new("MHC", "HTM")
    }
}

/// Resolve a file name using the stock `MHC#####.HTM` convention.
pub fn resolve(file_name: &str) -> Option<ChapterRef> {
    FilenamePattern::default().resolve(file_name)
}
