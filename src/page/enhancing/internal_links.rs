//! Internal link suggestions
//!
//! Where other pages of the site should be linked from a section. The page index is the
//! caller's business, so this is a trait; [TitleIndex] is a small implementation that links a
//! page wherever its title appears in the body text.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::page::ast::Section;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    /// Text to link, as it appears in the section
    pub anchor_text: String,
    pub target_url: String,
}

/// Source of internal link suggestions
pub trait PageIndex {
    fn suggest_links(&self, section: &Section) -> Vec<InternalLink>;
}

/// A page that can be linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub title: String,
    pub url: String,
}

/// Links pages by title: case-insensitive, whole words, first mention per section.
#[derive(Debug, Clone)]
pub struct TitleIndex {
    pages: Vec<(PageEntry, Regex)>,
}

impl TitleIndex {
    /// Entries with a blank title or url are dropped.
    pub fn new(pages: Vec<PageEntry>) -> Self {
        let pages = pages
            .into_iter()
            .filter(|p| !p.title.trim().is_empty() && !p.url.trim().is_empty())
            .filter_map(|page| {
                let pattern = format!(r"(?i)(^|\W){}($|\W)", regex::escape(page.title.trim()));
                Regex::new(&pattern).ok().map(|re| (page, re))
            })
            .collect();
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageIndex for TitleIndex {
    fn suggest_links(&self, section: &Section) -> Vec<InternalLink> {
        let body = section
            .body
            .iter()
            .map(|node| node.plain_text())
            .collect::<Vec<_>>()
            .join("\n");

        self.pages
            .iter()
            .filter_map(|(page, pattern)| {
                let found = pattern.captures(&body)?;
                let whole = found.get(0)?;
                let start = whole.start() + found.get(1).map_or(0, |m| m.len());
                let end = whole.end() - found.get(2).map_or(0, |m| m.len());
                Some(InternalLink {
                    anchor_text: body[start..end].to_string(),
                    target_url: page.url.clone(),
                })
            })
            .collect()
    }
}
