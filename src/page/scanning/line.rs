//! Line tokens
//!
//!     A brief is read one physical line at a time, and each line is tagged with exactly one
//!     shape. In the real world a line can look like more than one shape ("1. Pros:" is both an
//!     ordinal and a label), so the order in which classification tries shapes is load bearing.
//!     See [classify_line](super::line_classification::classify_line) for that order.
//!
//! Line Types
//!
//!         - Blank: empty or whitespace only
//!         - Heading(n): text ending in an `(hN)` marker with 1 <= N <= 6
//!         - BulletItem: starts with the `•` glyph
//!         - CsvMarker: the literal `csv`, first line after a heading
//!         - CsvRow: any non-blank line inside a csv block
//!         - MetadataLabel: `Label:` alone or `Label: value`
//!         - PlainText: anything else

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::page::token::Token;

use super::csv::split_row;

static MARKER_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(h[0-9]+\)\s*$").unwrap());

/// The classification of a line token
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineType {
    Blank,
    Heading(u8),
    BulletItem,
    CsvMarker,
    CsvRow,
    MetadataLabel,
    PlainText,
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineType::Blank => write!(f, "BLANK"),
            LineType::Heading(level) => write!(f, "HEADING({})", level),
            LineType::BulletItem => write!(f, "BULLET_ITEM"),
            LineType::CsvMarker => write!(f, "CSV_MARKER"),
            LineType::CsvRow => write!(f, "CSV_ROW"),
            LineType::MetadataLabel => write!(f, "METADATA_LABEL"),
            LineType::PlainText => write!(f, "PLAIN_TEXT"),
        }
    }
}

/// One scanned line: where it came from, what it says, and what shape it has.
#[derive(Debug, Clone, PartialEq)]
pub struct LineToken {
    /// 1-based line number in the source
    pub line_number: usize,
    /// The source line with surrounding whitespace removed
    pub text: String,
    /// Tokens of the source line, used for classification
    pub source_tokens: Vec<Token>,
    pub line_type: LineType,
    /// Set when a heading marker was found but rejected; the line is then PlainText
    pub demoted: Option<Demotion>,
}

/// Why a heading-shaped line was demoted to plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demotion {
    /// Marker level outside 1..=6
    MalformedLevel(u32),
    /// Marker with no heading text before it
    EmptyHeading,
}

impl LineToken {
    pub fn is_blank(&self) -> bool {
        self.line_type == LineType::Blank
    }

    /// Heading text with the `(hN)` marker removed.
    pub fn heading_text(&self) -> &str {
        match MARKER_SUFFIX.find(&self.text) {
            Some(m) => self.text[..m.start()].trim(),
            None => &self.text,
        }
    }

    /// Bullet item text with the glyph removed.
    pub fn bullet_text(&self) -> &str {
        self.text.trim_start_matches('•').trim()
    }

    /// Label and (possibly empty) inline value of a label line.
    pub fn label(&self) -> Option<(&str, &str)> {
        if self.line_type != LineType::MetadataLabel {
            return None;
        }
        let (label, value) = self.text.split_once(':')?;
        Some((label.trim(), value.trim()))
    }

    /// Cells of a csv row.
    pub fn csv_cells(&self) -> Vec<String> {
        split_row(&self.text)
    }
}
