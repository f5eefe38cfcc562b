//! Section classification
//!
//!     Every heading gets exactly one [SectionType]. The decision is a chain of predicates over
//!     the heading text, the first body line and the parent section, and the chain has a
//!     priority: a numbered heading that mentions a disclaimer is a disclaimer, not a review.
//!     The chain is therefore kept as one ordered table, [RULES], evaluated top to bottom with
//!     the first match winning.
//!
//! Rules (in order)
//!
//!         1. heading contains "disclaimer" or "notice"        -> Disclaimer
//!         2. heading contains "frequently asked questions"     -> FAQGroup
//!            (or is exactly "FAQ" / "FAQs")
//!         3. parent is a FAQGroup exactly one level up         -> FAQItem
//!         4. heading reads "<n>. <Name> - <tagline>"           -> PlatformReview
//!         5. first body line is the `csv` marker               -> ComparisonTable
//!         6. otherwise                                         -> Standard

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::page::ast::SectionType;

static REVIEW_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\.\s+(.+?)\s+[-–—]\s+(.+?)\s*$").unwrap());

/// Everything the classifier may look at
#[derive(Debug, Clone, Copy)]
pub struct ClassifierInput<'a> {
    pub heading_text: &'a str,
    pub level: u8,
    /// First non-blank body line, if the section has one
    pub first_body_line: Option<FirstBodyLine>,
    /// Type and level of the enclosing section
    pub parent: Option<(SectionType, u8)>,
}

/// The only property of the first body line the rules care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstBodyLine {
    CsvMarker,
    Other,
}

pub type Predicate = fn(&ClassifierInput<'_>) -> bool;

/// The ordered rule list. Order is load bearing.
pub const RULES: &[(SectionType, Predicate)] = &[
    (SectionType::Disclaimer, is_disclaimer),
    (SectionType::FAQGroup, is_faq_group),
    (SectionType::FAQItem, is_faq_item),
    (SectionType::PlatformReview, is_platform_review),
    (SectionType::ComparisonTable, is_comparison_table),
];

/// Classify a section. Falls back to [SectionType::Standard].
pub fn classify(input: &ClassifierInput<'_>) -> SectionType {
    let section_type = RULES
        .iter()
        .find(|(_, matches)| matches(input))
        .map(|(section_type, _)| *section_type)
        .unwrap_or(SectionType::Standard);

    tracing::debug!(
        heading = input.heading_text,
        level = input.level,
        %section_type,
        "classified section"
    );
    section_type
}

fn is_disclaimer(input: &ClassifierInput<'_>) -> bool {
    let heading = input.heading_text.to_lowercase();
    heading.contains("disclaimer") || heading.contains("notice")
}

fn is_faq_group(input: &ClassifierInput<'_>) -> bool {
    let heading = input.heading_text.to_lowercase();
    heading.contains("frequently asked questions") || matches!(heading.trim(), "faq" | "faqs")
}

fn is_faq_item(input: &ClassifierInput<'_>) -> bool {
    matches!(
        input.parent,
        Some((SectionType::FAQGroup, parent_level)) if input.level == parent_level + 1
    )
}

fn is_platform_review(input: &ClassifierInput<'_>) -> bool {
    REVIEW_HEADING.is_match(input.heading_text)
}

fn is_comparison_table(input: &ClassifierInput<'_>) -> bool {
    input.first_body_line == Some(FirstBodyLine::CsvMarker)
}

/// The parts of a "<n>. <Name> - <tagline>" heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewHeading {
    pub ordinal: u32,
    pub name: String,
    pub tagline: String,
}

/// Split a review heading into its parts, if it is one.
pub fn parse_review_heading(heading_text: &str) -> Option<ReviewHeading> {
    let caps = REVIEW_HEADING.captures(heading_text)?;
    Some(ReviewHeading {
        ordinal: caps[1].parse().ok()?,
        name: caps[2].trim().to_string(),
        tagline: caps[3].trim().to_string(),
    })
}
