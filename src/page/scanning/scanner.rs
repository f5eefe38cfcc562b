//! Scanner
//!
//! Lazily turns source text into [LineToken]s. Each line is classified on its own, with one
//! piece of carried state: whether we are inside a csv block. A line equal to `csv` that is the
//! first non-blank line after a heading opens a block; every following non-blank line is a
//! [LineType::CsvRow] until a blank line or a heading closes it.

use std::str::Lines;

use crate::page::token::{tokenize, Token};

use super::line::{LineToken, LineType};
use super::line_classification::classify_line;

pub const CSV_MARKER: &str = "csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsvState {
    /// Nothing special; a `csv` line here is plain text
    Outside,
    /// Seen a heading, no body line yet
    AfterHeading,
    /// Between `csv` and the closing blank line or heading
    Inside,
}

/// Iterator over the classified lines of a brief.
pub struct Scanner<'a> {
    lines: Lines<'a>,
    line_number: usize,
    csv: CsvState,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            line_number: 0,
            csv: CsvState::Outside,
        }
    }

    fn next_line_type(&mut self, text: &str, shape: LineType) -> LineType {
        match (self.csv, shape) {
            (_, LineType::Heading(_)) => {
                self.csv = CsvState::AfterHeading;
                shape
            }
            (_, LineType::Blank) => {
                if self.csv == CsvState::Inside {
                    self.csv = CsvState::Outside;
                }
                shape
            }
            (CsvState::AfterHeading, _) if text == CSV_MARKER => {
                self.csv = CsvState::Inside;
                LineType::CsvMarker
            }
            (CsvState::Inside, _) => LineType::CsvRow,
            _ => {
                self.csv = CsvState::Outside;
                shape
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = LineToken;

    fn next(&mut self) -> Option<LineToken> {
        let raw = self.lines.next()?;
        self.line_number += 1;

        let source_tokens: Vec<Token> = tokenize(raw).into_iter().map(|(t, _)| t).collect();
        let (shape, demoted) = classify_line(&source_tokens);
        let text = raw.trim().to_string();
        let line_type = self.next_line_type(&text, shape);
        let demoted = if line_type == shape { demoted } else { None };

        Some(LineToken {
            line_number: self.line_number,
            text,
            source_tokens,
            line_type,
            demoted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<LineType> {
        Scanner::new(source).map(|l| l.line_type).collect()
    }

    #[test]
    fn test_csv_block_after_heading() {
        let source = "Top Platforms (h2)\ncsv\nCasino,Bonus\nBet365,100%\n\nAfter the table.";
        assert_eq!(
            types(source),
            vec![
                LineType::Heading(2),
                LineType::CsvMarker,
                LineType::CsvRow,
                LineType::CsvRow,
                LineType::Blank,
                LineType::PlainText,
            ]
        );
    }

    #[test]
    fn test_csv_marker_may_follow_blank_lines() {
        let source = "Table (h2)\n\ncsv\nA,B";
        assert_eq!(
            types(source),
            vec![
                LineType::Heading(2),
                LineType::Blank,
                LineType::CsvMarker,
                LineType::CsvRow,
            ]
        );
    }

    #[test]
    fn test_csv_word_in_body_is_plain_text() {
        let source = "Intro (h2)\nSome text\ncsv";
        assert_eq!(
            types(source),
            vec![LineType::Heading(2), LineType::PlainText, LineType::PlainText]
        );
    }

    #[test]
    fn test_heading_closes_csv_block() {
        let source = "T (h2)\ncsv\nA,B\nNext (h2)\nText";
        assert_eq!(
            types(source),
            vec![
                LineType::Heading(2),
                LineType::CsvMarker,
                LineType::CsvRow,
                LineType::Heading(2),
                LineType::PlainText,
            ]
        );
    }

    #[test]
    fn test_rows_that_look_like_other_shapes_stay_rows() {
        let source = "T (h2)\ncsv\nName: x,• y";
        assert_eq!(
            types(source),
            vec![LineType::Heading(2), LineType::CsvMarker, LineType::CsvRow]
        );
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let numbers: Vec<usize> = Scanner::new("a\n\nb").map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert_eq!(Scanner::new("").count(), 0);
    }
}
