//! Section element
//!
//!     A section is one heading-delimited unit of a brief. Sections nest by heading level: the
//!     children of a section are the subsequent headings of strictly greater level, up to the
//!     next heading of equal or lesser level. A brief therefore forms a tree under its single
//!     level-1 heading.
//!
//!     Each section carries a [SectionType], decided once by the
//!     [classifier](crate::page::classifying) from its heading, its first body line and its
//!     parent. Renderers and the enhancer branch on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::content::ContentNode;
use crate::page::classifying::{parse_review_heading, ReviewHeading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Standard,
    ComparisonTable,
    Disclaimer,
    PlatformReview,
    #[serde(rename = "faq_group")]
    FAQGroup,
    #[serde(rename = "faq_item")]
    FAQItem,
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Standard => "standard",
            SectionType::ComparisonTable => "comparison_table",
            SectionType::Disclaimer => "disclaimer",
            SectionType::PlatformReview => "platform_review",
            SectionType::FAQGroup => "faq_group",
            SectionType::FAQItem => "faq_item",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading level, 1..=6
    pub level: u8,
    pub heading_text: String,
    pub section_type: SectionType,
    pub body: Vec<ContentNode>,
    pub children: Vec<Section>,
    /// 1-based line of the heading; 0 for a synthesized root
    pub line_number: usize,
}

impl Section {
    pub fn new(level: u8, heading_text: impl Into<String>, section_type: SectionType) -> Self {
        Self {
            level,
            heading_text: heading_text.into(),
            section_type,
            body: Vec::new(),
            children: Vec::new(),
            line_number: 0,
        }
    }

    /// Preferred builder
    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_body(mut self, body: Vec<ContentNode>) -> Self {
        self.body = body;
        self
    }

    pub fn with_children(mut self, children: Vec<Section>) -> Self {
        self.children = children;
        self
    }

    /// Ordinal, platform name and tagline, for platform reviews.
    pub fn review_heading(&self) -> Option<ReviewHeading> {
        if self.section_type != SectionType::PlatformReview {
            return None;
        }
        parse_review_heading(&self.heading_text)
    }

    /// Platform named by this section's heading, if it is a review.
    pub fn platform_name(&self) -> Option<String> {
        self.review_heading().map(|r| r.name)
    }

    /// Heading and body text joined by spaces. Children are not included.
    pub fn plain_text(&self) -> String {
        std::iter::once(self.heading_text.clone())
            .chain(self.body.iter().map(ContentNode::plain_text))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of sections in this subtree, this one included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Section::subtree_len).sum::<usize>()
    }
}
