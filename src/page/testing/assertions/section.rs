//! Section assertions

use super::{summarize_nodes, summarize_sections, ContentAssertion};
use crate::page::ast::{Section, SectionType};

pub struct SectionAssertion<'a> {
    pub(crate) section: &'a Section,
    pub(crate) context: String,
}

impl<'a> SectionAssertion<'a> {
    pub fn heading(self, expected: &str) -> Self {
        let actual = &self.section.heading_text;
        assert_eq!(
            actual, expected,
            "{}: Expected heading '{}', but got '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn heading_contains(self, substring: &str) -> Self {
        let actual = &self.section.heading_text;
        assert!(
            actual.contains(substring),
            "{}: Expected heading to contain '{}', but got '{}'",
            self.context,
            substring,
            actual
        );
        self
    }

    pub fn level(self, expected: u8) -> Self {
        assert_eq!(
            self.section.level, expected,
            "{}: Expected level {}, found {}",
            self.context, expected, self.section.level
        );
        self
    }

    pub fn kind(self, expected: SectionType) -> Self {
        assert_eq!(
            self.section.section_type, expected,
            "{}: Expected a {} section, found {}",
            self.context, expected, self.section.section_type
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.section.line_number, expected,
            "{}: Expected heading on line {}, found {}",
            self.context, expected, self.section.line_number
        );
        self
    }

    /// Assert the review heading names this platform
    pub fn platform(self, expected: &str) -> Self {
        let actual = self.section.platform_name();
        assert_eq!(
            actual.as_deref(),
            Some(expected),
            "{}: Expected a review of '{}', found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn node_count(self, expected: usize) -> Self {
        let actual = self.section.body.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} body nodes, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_nodes(&self.section.body)
        );
        self
    }

    pub fn node<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ContentAssertion<'a>),
    {
        let body = &self.section.body;
        assert!(
            index < body.len(),
            "{}: Node index {} out of bounds (section has {} nodes)",
            self.context,
            index,
            body.len()
        );
        assertion(ContentAssertion {
            node: &body[index],
            context: format!("{}:body[{}]", self.context, index),
        });
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.section.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} subsections, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_sections(&self.section.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        let children = &self.section.children;
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (section has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(SectionAssertion {
            section: &children[index],
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }
}
