//! Document-level assertions

use super::{summarize_sections, SectionAssertion};
use crate::page::ast::{Document, WarningCode};

pub struct DocumentAssertion<'a> {
    pub(crate) doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top-level sections
    pub fn section_count(self, expected: usize) -> Self {
        let actual = self.doc.sections.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} top-level sections, found {}: [{}]",
            expected,
            actual,
            summarize_sections(&self.doc.sections)
        );
        self
    }

    /// Assert the number of sections at any depth
    pub fn total_sections(self, expected: usize) -> Self {
        let actual = self.doc.section_count();
        assert_eq!(
            actual, expected,
            "Expected {} sections in total, found {}",
            expected, actual
        );
        self
    }

    pub fn section<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assert!(
            index < self.doc.sections.len(),
            "Section index {} out of bounds (document has {} sections)",
            index,
            self.doc.sections.len()
        );
        assertion(SectionAssertion {
            section: &self.doc.sections[index],
            context: format!("sections[{}]", index),
        });
        self
    }

    /// Assert a metadata value by its label, as written in the brief
    pub fn metadata(self, label: &str, expected: &str) -> Self {
        let actual = self.doc.metadata.get(label);
        assert_eq!(
            actual,
            Some(expected),
            "Expected metadata '{}' to be '{}', found {:?}",
            label,
            expected,
            actual
        );
        self
    }

    pub fn no_warnings(self) -> Self {
        assert!(
            self.doc.warnings.is_empty(),
            "Expected no warnings, found: {:?}",
            self.doc.warnings
        );
        self
    }

    pub fn warning_count(self, expected: usize) -> Self {
        let actual = self.doc.warnings.len();
        assert_eq!(
            actual, expected,
            "Expected {} warnings, found {}: {:?}",
            expected, actual, self.doc.warnings
        );
        self
    }

    /// Assert a warning with this code was reported on this line
    pub fn warning(self, line: usize, code: WarningCode) -> Self {
        assert!(
            self.doc
                .warnings
                .iter()
                .any(|w| w.line == line && w.code == code),
            "Expected warning [{}] on line {}, found: {:?}",
            code.as_str(),
            line,
            self.doc.warnings
        );
        self
    }
}
