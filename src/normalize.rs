//! HTML-to-prose reduction.
//!
//! The commentary files are loosely-formed legacy HTML. Nothing here parses
//! them; markup is removed lexically, in a fixed order:
//!
//! 1. Decode bytes as UTF-8, dropping any invalid sequences.
//! 2. Replace every `<...>` tag with a single space.
//! 3. Decode character entities (`&amp;`, `&#39;`, `&eacute;`, ...) the way
//!    a browser does: legacy names without `;` (`&nbsp`, `&copy`), numeric
//!    references without `;`, and `&#128;`-`&#159;` read as Windows-1252.
//! 4. Collapse each whitespace run (including newlines, tabs and NBSP) to one space.
//! 5. Trim both ends.
//!
//! Entity decoding runs after tag removal, so escaped markup in the source
//! (`&lt;p&gt;`) survives as literal text.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decode UTF-8, silently dropping byte sequences that aren't valid.
///
/// Unlike [`String::from_utf8_lossy`] no replacement characters are inserted.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Replace every markup tag with a single space.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, " ").into_owned()
}

/// Decode named and numeric HTML character references.
///
/// Follows the HTML character reference rules for text content. NUL,
/// surrogates and out-of-range code points become U+FFFD.
pub fn decode_entities(text: &str) -> String {
    htmlize::unescape(text).into_owned()
}

/// Collapse whitespace runs to a single ASCII space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Full tag-strip, entity-decode, whitespace-collapse pass.
pub fn clean_text(html: &str) -> String {
    let text = strip_tags(html);
    let text = decode_entities(&text);
    collapse_whitespace(&text)
}

/// Keep at most `max_chars` characters.
///
/// A hard cut: it may land mid-word. Counting is by `char`, so a multi-byte
/// character is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
