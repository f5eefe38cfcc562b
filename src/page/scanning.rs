//! Scanning
//!
//!     This module turns a brief into a lazy stream of classified lines. Briefs are written by
//!     people, in word processors, with loosely followed conventions, so the scanner is
//!     deliberately shallow: it tags every physical line with one shape and leaves all
//!     structure (metadata, section nesting, grouping lines into blocks) to the parser.
//!
//! The Scanning Pipeline
//!
//!     1. Core tokenization of each line using logos. See [token](crate::page::token).
//!     2. Line classification from those tokens. See [line_classification].
//!     3. Csv block tracking, the only state carried between lines. See [scanner].
//!
//!     Heading levels are taken verbatim from the `(hN)` marker, never inferred.

pub mod csv;
pub mod line;
pub mod line_classification;
pub mod scanner;

pub use line::{Demotion, LineToken, LineType};
pub use scanner::{Scanner, CSV_MARKER};

/// Scan source text into classified lines.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}
