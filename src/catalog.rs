//! Book-number to book-name lookup.
//!
//! The commentary numbers books 01–66 in canonical Protestant order. Only the
//! New Testament (40–66) is catalogued; anything else is not converted.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// New Testament books keyed by their file-name book number.
pub const NEW_TESTAMENT: [(u8, &str); 27] = [
    (40, "Matthew"),
    (41, "Mark"),
    (42, "Luke"),
    (43, "John"),
    (44, "Acts"),
    (45, "Romans"),
    (46, "1 Corinthians"),
    (47, "2 Corinthians"),
    (48, "Galatians"),
    (49, "Ephesians"),
    (50, "Philippians"),
    (51, "Colossians"),
    (52, "1 Thessalonians"),
    (53, "2 Thessalonians"),
    (54, "1 Timothy"),
    (55, "2 Timothy"),
    (56, "Titus"),
    (57, "Philemon"),
    (58, "Hebrews"),
    (59, "James"),
    (60, "1 Peter"),
    (61, "2 Peter"),
    (62, "1 John"),
    (63, "2 John"),
    (64, "3 John"),
    (65, "Jude"),
    (66, "Revelation"),
];

const FIRST_BOOK: u8 = NEW_TESTAMENT[0].0;

/// Look up a book's name. `None` for numbers outside the catalog.
pub fn book_name(book: u8) -> Option<&'static str> {
    let idx = usize::from(book.checked_sub(FIRST_BOOK)?);
    NEW_TESTAMENT.get(idx).map(|&(_, name)| name)
}

/// Inclusive book-number range used to select which files a batch converts.
///
/// Serialized as a two-element array, `[40, 66]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct BookRange {
    pub first: u8,
    pub last: u8,
}

impl BookRange {
    pub const NEW_TESTAMENT: BookRange = BookRange {
        first: 40,
        last: 66,
    };

    pub fn contains(&self, book: u8) -> bool {
        self.as_range().contains(&book)
    }

    pub fn as_range(&self) -> RangeInclusive<u8> {
        self.first..=self.last
    }
}

impl Default for BookRange {
    fn default() -> Self {
        Self::NEW_TESTAMENT
    }
}

impl From<[u8; 2]> for BookRange {
    fn from([first, last]: [u8; 2]) -> Self {
        Self { first, last }
    }
}

impl From<BookRange> for [u8; 2] {
    fn from(r: BookRange) -> Self {
        [r.first, r.last]
    }
}
