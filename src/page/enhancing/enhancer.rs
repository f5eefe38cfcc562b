//! Enhancement driver
//!
//!     Walks the section tree in pre-order (the order a reader meets the text) and, per
//!     section:
//!         1. places affiliate anchors on the body text
//!         2. picks an image
//!         3. asks the page index, if any, for internal links
//!
//!     The body of a section is annotated as one string: every text field of every node, in
//!     reading order, joined with newlines. Platform names never contain a newline, so no
//!     anchor can straddle two fields; each anchor is then mapped back to its node and field
//!     with field-local offsets.
//!
//!     Occurrence caps and internal link targets are counted per document: a fresh counter
//!     is made for every call to [Enhancer::enhance].

use std::collections::HashSet;

use crate::page::ast::{Document, Section, TextField};
use crate::page::enhancing::affiliate::{annotate, LinkOccurrenceCounter, LinkTable};
use crate::page::enhancing::images::{ImageLibrary, ImageMatcher};
use crate::page::enhancing::internal_links::{InternalLink, PageIndex};
use crate::page::enhancing::model::{
    EnhancedDocument, NodeAnchor, NodeAnnotations, SectionAnnotations,
};
use crate::page::enhancing::options::ImageMatchOptions;

/// Where one text field sits in a section's joined body text
#[derive(Debug)]
struct FieldSpan {
    node: usize,
    field: TextField,
    start: usize,
    end: usize,
}

#[derive(Default)]
struct DocumentState {
    counter: LinkOccurrenceCounter,
    capped: usize,
    linked_pages: HashSet<String>,
}

pub struct Enhancer<'a> {
    images: ImageMatcher<'a>,
    links: &'a LinkTable,
    page_index: Option<&'a dyn PageIndex>,
}

impl<'a> Enhancer<'a> {
    pub fn new(
        images: &'a ImageLibrary,
        image_options: &'a ImageMatchOptions,
        links: &'a LinkTable,
    ) -> Self {
        Self {
            images: ImageMatcher::new(images, image_options),
            links,
            page_index: None,
        }
    }

    pub fn with_page_index(mut self, page_index: &'a dyn PageIndex) -> Self {
        self.page_index = Some(page_index);
        self
    }

    pub fn enhance(&self, document: Document) -> EnhancedDocument {
        let mut state = DocumentState::default();
        let sections = document
            .sections
            .iter()
            .map(|section| self.annotate_section(section, &mut state))
            .collect();

        let enhanced = EnhancedDocument { document, sections };
        tracing::info!(
            sections = enhanced.document.section_count(),
            anchors = state.counter.total(),
            capped = state.capped,
            images = enhanced.image_count(),
            internal_links = state.linked_pages.len(),
            "enhanced document"
        );
        enhanced
    }

    fn annotate_section(
        &self,
        section: &Section,
        state: &mut DocumentState,
    ) -> SectionAnnotations {
        let nodes = self.annotate_body(section, state);
        let image = self.images.match_section(section);
        let internal_links = self.suggest_links(section, state);
        let children = section
            .children
            .iter()
            .map(|child| self.annotate_section(child, state))
            .collect();

        SectionAnnotations {
            image,
            nodes,
            internal_links,
            children,
        }
    }

    fn annotate_body(
        &self,
        section: &Section,
        state: &mut DocumentState,
    ) -> Vec<NodeAnnotations> {
        let mut nodes = vec![NodeAnnotations::default(); section.body.len()];
        if self.links.is_empty() {
            return nodes;
        }

        let mut joined = String::new();
        let mut spans: Vec<FieldSpan> = Vec::new();
        for (node, content) in section.body.iter().enumerate() {
            for (field, text) in content.text_fields() {
                if !spans.is_empty() {
                    joined.push('\n');
                }
                let start = joined.len();
                joined.push_str(text);
                spans.push(FieldSpan {
                    node,
                    field,
                    start,
                    end: joined.len(),
                });
            }
        }

        let annotated = annotate(&joined, self.links, &mut state.counter);
        state.capped += annotated.capped;

        let mut cursor = 0;
        for mut anchor in annotated.anchors {
            while cursor < spans.len() && spans[cursor].end < anchor.end {
                cursor += 1;
            }
            let Some(span) = spans.get(cursor).filter(|s| s.start <= anchor.start) else {
                tracing::debug!(
                    heading = section.heading_text.as_str(),
                    platform = anchor.platform.as_str(),
                    "anchor crosses a field boundary"
                );
                continue;
            };
            anchor.start -= span.start;
            anchor.end -= span.start;
            nodes[span.node].anchors.push(NodeAnchor {
                field: span.field,
                anchor,
            });
        }

        nodes
    }

    fn suggest_links(&self, section: &Section, state: &mut DocumentState) -> Vec<InternalLink> {
        let Some(index) = self.page_index else {
            return Vec::new();
        };
        index
            .suggest_links(section)
            .into_iter()
            .filter(|link| state.linked_pages.insert(link.target_url.clone()))
            .collect()
    }
}

/// Enhance with default image scoring and no internal links.
pub fn enhance(document: Document, images: &ImageLibrary, links: &LinkTable) -> EnhancedDocument {
    let options = ImageMatchOptions::default();
    Enhancer::new(images, &options, links).enhance(document)
}
