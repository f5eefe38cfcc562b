//! Image matching
//!
//!     Picks at most one image from the library for a section. Both sides are reduced to a
//!     bag of terms (lowercase, split on anything that is not a letter or digit, stopwords
//!     dropped, a trailing plural `s` folded). The section's terms come from its heading and,
//!     for reviews, the platform name; the image's from its title and keywords.
//!
//!     Score:
//!         shared terms * keyword_weight
//!       + phrase_weight         if a review's platform name appears in the image title
//!       + category weights      for each keyword category the image belongs to, by the
//!                               role of the section (review, lead or body)
//!
//!     Category weights only apply once the image is relevant at all (shared terms or the
//!     phrase bonus). The best score wins; ties go to the image listed first. Nothing is
//!     returned when the best score is zero or below `min_score`. Scores saturate at
//!     `u32::MAX`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::page::ast::{Section, SectionType};
use crate::page::enhancing::options::{ImageMatchOptions, RoleWeights};

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "best", "by", "for", "from", "how", "in", "is", "of",
    "on", "or", "our", "the", "to", "top", "vs", "what", "why", "with", "your",
];

/// One entry of the image library, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ImageRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }
}

/// Read-only image library. Order matters: it breaks ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageLibrary {
    records: Vec<ImageRecord>,
}

impl ImageLibrary {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The image chosen for a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Position in the library
    pub index: usize,
    pub title: String,
    pub url: String,
    /// Platform name for reviews, heading text otherwise
    pub alt: String,
    pub score: u32,
}

/// What a section is for, as far as image categories care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole {
    Review,
    Lead,
    Body,
}

impl SectionRole {
    pub fn of(section: &Section) -> Self {
        match section.section_type {
            SectionType::PlatformReview => SectionRole::Review,
            _ if section.level == 1 => SectionRole::Lead,
            _ => SectionRole::Body,
        }
    }

    fn weight(self, weights: &RoleWeights) -> u32 {
        match self {
            SectionRole::Review => weights.review,
            SectionRole::Lead => weights.lead,
            SectionRole::Body => weights.body,
        }
    }
}

/// Reduce text to its matching terms.
pub fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .map(fold_plural)
        .collect()
}

fn fold_plural(word: String) -> String {
    if word.chars().count() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}

/// Scores sections against one library
pub struct ImageMatcher<'a> {
    library: &'a ImageLibrary,
    options: &'a ImageMatchOptions,
    record_terms: Vec<BTreeSet<String>>,
}

impl<'a> ImageMatcher<'a> {
    pub fn new(library: &'a ImageLibrary, options: &'a ImageMatchOptions) -> Self {
        let record_terms = library
            .records
            .iter()
            .map(|record| {
                let mut bag = terms(&record.title);
                for keyword in &record.keywords {
                    bag.extend(terms(keyword));
                }
                bag
            })
            .collect();
        Self {
            library,
            options,
            record_terms,
        }
    }

    /// Best image for the section, if any clears the threshold.
    pub fn match_section(&self, section: &Section) -> Option<ImageRef> {
        let platform = section.platform_name();
        let role = SectionRole::of(section);

        let mut query = terms(&section.heading_text);
        if let Some(name) = &platform {
            query.extend(terms(name));
        }
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(usize, u32)> = None;
        for (index, record) in self.library.records.iter().enumerate() {
            let score = self.score(index, record, &query, platform.as_deref(), role);
            if score > 0 && best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        if score < self.options.min_score {
            tracing::debug!(
                heading = section.heading_text.as_str(),
                score,
                "best image below threshold"
            );
            return None;
        }

        let record = &self.library.records[index];
        Some(ImageRef {
            index,
            title: record.title.clone(),
            url: record.url.clone(),
            alt: platform.unwrap_or_else(|| section.heading_text.clone()),
            score,
        })
    }

    fn score(
        &self,
        index: usize,
        record: &ImageRecord,
        query: &BTreeSet<String>,
        platform: Option<&str>,
        role: SectionRole,
    ) -> u32 {
        let bag = &self.record_terms[index];
        let shared = query.intersection(bag).count() as u32;
        let mut score = shared.saturating_mul(self.options.keyword_weight);

        if let Some(name) = platform {
            if record.title.to_lowercase().contains(&name.to_lowercase()) {
                score = score.saturating_add(self.options.phrase_weight);
            }
        }
        if score == 0 {
            return 0;
        }

        for category in &self.options.categories {
            if category.keywords.iter().any(|k| bag.contains(&fold_plural(k.clone()))) {
                score = score.saturating_add(role.weight(&category.weights));
            }
        }
        score
    }
}
