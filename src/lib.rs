//! # mhc-json
//!
//! Converts the public-domain HTML edition of Matthew Henry's *Commentary on
//! the Whole Bible* into JSON records, one per chapter, for a reading app.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      input dir  →  selected files   (name → book/chapter, range, limit)
//! 2. Convert   files      →  records          (read → clean text → assemble)
//! 3. Write     records    →  output.json      (pretty JSON array)
//! ```
//!
//! Per file, conversion is a pure function of the file name and contents:
//!
//! ```text
//! MHC45003.HTM ──naming──▶ (45, 3) ──catalog──▶ "Romans"
//!      │                                           │
//!      └── bytes ──normalize──▶ clean text ──record──▶ {"reference": "Romans 3", ...}
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `<prefix><book:2><chapter:3>.<ext>` file name resolver |
//! | [`catalog`] | Static New Testament book-number → name table |
//! | [`normalize`] | Lossy UTF-8 decode, tag stripping, entity decoding, whitespace collapse, truncation |
//! | [`record`] | `CommentaryRecord`, skip rules, and record assembly |
//! | [`scan`] | Stage 1: directory walk, range filter, sort, sampling limit |
//! | [`convert`] | Stage 2/3: per-file conversion (parallel, order-preserving) and JSON output |
//! | [`config`] | Layered TOML configuration |
//! | [`output`] | CLI progress formatting |
//!
//! # Skips Are Not Errors
//!
//! Three kinds of file quietly produce nothing: names that don't follow the
//! convention, books outside the catalog, and chapter `000` introductions.
//! An unreadable file, by contrast, fails the whole batch unless the
//! `skip` read-error policy is configured.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod record;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
