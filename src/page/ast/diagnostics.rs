//! Structural warnings
//!
//! Parsing never fails on content. Whenever the parser has to recover from something malformed
//! (a heading marker it cannot use, a ragged csv row, text with no heading to live under) it
//! records a [StructuralWarning] on the document and logs it, then carries on with a fallback.

use std::fmt;

/// What kind of recovery happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCode {
    /// Heading marker level outside 1..=6, line kept as text
    MalformedHeading,
    /// Heading marker with no text, line kept as text
    EmptyHeading,
    /// Heading deeper than 1 before any level-1 heading
    OrphanHeading,
    /// A second level-1 heading, demoted to level 2
    DuplicateRoot,
    /// Csv row shorter than the header, padded with empty cells
    CsvRowPadded,
    /// Csv row longer than the header, extra cells dropped
    CsvRowTruncated,
    /// Csv marker with no rows
    EmptyTable,
    /// Body text before any heading
    OrphanContent,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::MalformedHeading => "malformed-heading",
            WarningCode::EmptyHeading => "empty-heading",
            WarningCode::OrphanHeading => "orphan-heading",
            WarningCode::DuplicateRoot => "duplicate-root",
            WarningCode::CsvRowPadded => "csv-row-padded",
            WarningCode::CsvRowTruncated => "csv-row-truncated",
            WarningCode::EmptyTable => "empty-table",
            WarningCode::OrphanContent => "orphan-content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StructuralWarning {
    /// 1-based source line
    pub line: usize,
    pub code: WarningCode,
    pub message: String,
}

impl StructuralWarning {
    pub fn new(line: usize, code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            line,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for StructuralWarning {
    /// Format as: `line 12: warning [csv-row-padded]: message`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: warning [{}]: {}",
            self.line,
            self.code.as_str(),
            self.message
        )
    }
}
