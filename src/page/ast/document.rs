//! Document element
//!
//!     The root of a parsed brief: the metadata block that precedes the `Content` marker and
//!     the tree of sections that follows it. A document is built once per input text and is
//!     not modified afterwards; enhancement produces annotations alongside it instead.
//!
//! Metadata
//!
//!     Briefs open with labelled lines ("Target Keyword: ...", "URL Slug:" followed by the
//!     slug on the next line). Recognised labels fill named fields; anything else is kept
//!     verbatim in [Metadata::extra] under its label, so new labels survive without parser
//!     changes. Missing fields are empty strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::content::ContentNode;
use super::diagnostics::StructuralWarning;
use super::section::{Section, SectionType};

/// Image the writer asked to feature at the top of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub description: String,
    pub seo_title: String,
    pub alt_tag: String,
}

impl FeaturedImage {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.seo_title.is_empty() && self.alt_tag.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub target_keyword: String,
    pub target_geo: String,
    pub url_slug: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Internal notes for the editor, possibly several paragraphs
    pub notes: String,
    pub featured_image: FeaturedImage,
    /// Unrecognised labels, keyed by the label as written
    pub extra: BTreeMap<String, String>,
}

/// Recognised metadata labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    TargetKeyword,
    TargetGeo,
    UrlSlug,
    MetaTitle,
    MetaDescription,
    Notes,
    FeaturedImage,
    SeoTitle,
    AltTag,
}

impl MetadataField {
    /// Match a label as written in a brief.
    ///
    /// Matching ignores case and any parenthesised hint, so "Meta Title (max 60):" is the
    /// meta title. Notes labels are matched by prefix ("Notes for MJ").
    pub fn from_label(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        let field = match key.as_str() {
            "target keyword" => MetadataField::TargetKeyword,
            "target geo" => MetadataField::TargetGeo,
            "url slug" | "slug" => MetadataField::UrlSlug,
            "meta title" => MetadataField::MetaTitle,
            "meta description" => MetadataField::MetaDescription,
            "featured image" => MetadataField::FeaturedImage,
            "seo title" => MetadataField::SeoTitle,
            "alt tag" | "alt text" => MetadataField::AltTag,
            k if k == "notes" || k.starts_with("notes ") => MetadataField::Notes,
            _ => return None,
        };
        Some(field)
    }
}

/// Lowercase, drop parenthesised hints, collapse whitespace.
fn normalize_label(label: &str) -> String {
    let mut plain = String::with_capacity(label.len());
    let mut depth = 0usize;
    for c in label.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => plain.extend(c.to_lowercase()),
            _ => {}
        }
    }
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Metadata {
    pub fn set(&mut self, field: MetadataField, value: String) {
        let slot = match field {
            MetadataField::TargetKeyword => &mut self.target_keyword,
            MetadataField::TargetGeo => &mut self.target_geo,
            MetadataField::UrlSlug => &mut self.url_slug,
            MetadataField::MetaTitle => &mut self.meta_title,
            MetadataField::MetaDescription => &mut self.meta_description,
            MetadataField::Notes => &mut self.notes,
            MetadataField::FeaturedImage => &mut self.featured_image.description,
            MetadataField::SeoTitle => &mut self.featured_image.seo_title,
            MetadataField::AltTag => &mut self.featured_image.alt_tag,
        };
        *slot = value;
    }

    /// Store a value under its label, routing recognised labels to their field.
    pub fn insert(&mut self, label: &str, value: String) {
        match MetadataField::from_label(label) {
            Some(field) => self.set(field, value),
            None => {
                self.extra.insert(label.to_string(), value);
            }
        }
    }

    /// Look up a value by label, recognised or not.
    pub fn get(&self, label: &str) -> Option<&str> {
        let value = match MetadataField::from_label(label) {
            Some(MetadataField::TargetKeyword) => &self.target_keyword,
            Some(MetadataField::TargetGeo) => &self.target_geo,
            Some(MetadataField::UrlSlug) => &self.url_slug,
            Some(MetadataField::MetaTitle) => &self.meta_title,
            Some(MetadataField::MetaDescription) => &self.meta_description,
            Some(MetadataField::Notes) => &self.notes,
            Some(MetadataField::FeaturedImage) => &self.featured_image.description,
            Some(MetadataField::SeoTitle) => &self.featured_image.seo_title,
            Some(MetadataField::AltTag) => &self.featured_image.alt_tag,
            None => self.extra.get(label)?,
        };
        Some(value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }

    /// Title to fall back on when the brief has no level-1 heading.
    pub fn fallback_title(&self) -> &str {
        if !self.meta_title.is_empty() {
            &self.meta_title
        } else {
            &self.target_keyword
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub warnings: Vec<StructuralWarning>,
}

impl Document {
    pub fn new(metadata: Metadata, sections: Vec<Section>) -> Self {
        Self {
            metadata,
            sections,
            warnings: Vec::new(),
        }
    }

    /// The level-1 section, if the document has any content.
    pub fn root(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// All sections in pre-order: a section before its children, children before the next
    /// sibling.
    pub fn iter_sections(&self) -> SectionIter<'_> {
        SectionIter {
            stack: self.sections.iter().rev().collect(),
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::subtree_len).sum()
    }

    /// Platforms mentioned structurally: review headings in document order, then the first
    /// column of comparison tables. Duplicates (ignoring case) are dropped.
    pub fn platform_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        };

        for section in self.iter_sections() {
            if let Some(name) = section.platform_name() {
                push(&name);
            }
        }
        for section in self.iter_sections() {
            if section.section_type != SectionType::ComparisonTable {
                continue;
            }
            for node in &section.body {
                if let ContentNode::Table { rows, .. } = node {
                    for row in rows {
                        if let Some(first) = row.first() {
                            push(first);
                        }
                    }
                }
            }
        }

        names
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document({} sections, {} warnings)",
            self.section_count(),
            self.warnings.len()
        )
    }
}

/// Pre-order iterator over a section forest
pub struct SectionIter<'a> {
    stack: Vec<&'a Section>,
}

impl<'a> Iterator for SectionIter<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<&'a Section> {
        let section = self.stack.pop()?;
        self.stack.extend(section.children.iter().rev());
        Some(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Document {
        let faq = Section::new(2, "FAQ", SectionType::FAQGroup)
            .with_children(vec![Section::new(3, "Q1", SectionType::FAQItem)]);
        let root = Section::new(1, "Root", SectionType::Standard)
            .with_children(vec![Section::new(2, "A", SectionType::Standard), faq]);
        Document::new(Metadata::default(), vec![root])
    }

    #[test]
    fn test_pre_order() {
        let doc = tree();
        let headings: Vec<&str> = doc.iter_sections().map(|s| s.heading_text.as_str()).collect();
        assert_eq!(headings, vec!["Root", "A", "FAQ", "Q1"]);
        assert_eq!(doc.section_count(), 4);
    }

    #[test]
    fn test_label_normalisation() {
        assert_eq!(
            MetadataField::from_label("Meta Title (60 chars max)"),
            Some(MetadataField::MetaTitle)
        );
        assert_eq!(MetadataField::from_label("URL SLUG"), Some(MetadataField::UrlSlug));
        assert_eq!(MetadataField::from_label("Notes for MJ"), Some(MetadataField::Notes));
        assert_eq!(MetadataField::from_label("Notebook"), None);
    }

    #[test]
    fn test_unknown_labels_kept_verbatim() {
        let mut metadata = Metadata::default();
        metadata.insert("Word Count", "2500".to_string());
        metadata.insert("Target Geo", "UK".to_string());
        assert_eq!(metadata.get("Word Count"), Some("2500"));
        assert_eq!(metadata.target_geo, "UK");
        assert_eq!(metadata.get("target geo"), Some("UK"));
        assert!(metadata.extra.get("Target Geo").is_none());
    }

    #[test]
    fn test_fallback_title() {
        let mut metadata = Metadata::default();
        metadata.target_keyword = "best casinos".to_string();
        assert_eq!(metadata.fallback_title(), "best casinos");
        metadata.meta_title = "The Best Casinos".to_string();
        assert_eq!(metadata.fallback_title(), "The Best Casinos");
    }

    #[test]
    fn test_platform_names_from_reviews_and_tables() {
        let review = Section::new(3, "1. Bet365 - Big markets", SectionType::PlatformReview);
        let table = Section::new(2, "Compare", SectionType::ComparisonTable).with_body(vec![
            ContentNode::Table {
                header: vec!["Casino".into()],
                rows: vec![vec!["bet365".into()], vec!["Stake".into()]],
            },
        ]);
        let root =
            Section::new(1, "Root", SectionType::Standard).with_children(vec![table, review]);
        let doc = Document::new(Metadata::default(), vec![root]);
        assert_eq!(doc.platform_names(), vec!["Bet365", "Stake"]);
    }
}
