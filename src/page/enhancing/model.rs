//! Enhanced document
//!
//!     The parsed document plus everything enhancement decided about it. Annotations form a
//!     tree parallel to the section tree: `sections[i]` annotates `document.sections[i]`,
//!     `sections[i].children[j]` its `j`-th child, and `nodes[k]` the `k`-th body node. The
//!     document itself is never modified; anchors point into its strings by field and byte
//!     offset.

use serde::Serialize;

use crate::page::ast::{ContentNode, Document, Section, TextField};
use crate::page::enhancing::affiliate::{runs, Anchor, TextRun};
use crate::page::enhancing::images::ImageRef;
use crate::page::enhancing::internal_links::InternalLink;

/// An anchor inside one string of a content node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeAnchor {
    pub field: TextField,
    #[serde(flatten)]
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeAnnotations {
    /// In reading order
    pub anchors: Vec<NodeAnchor>,
}

impl NodeAnnotations {
    /// Anchors that fall in one field, as plain anchors local to that field.
    pub fn anchors_in(&self, field: TextField) -> Vec<Anchor> {
        self.anchors
            .iter()
            .filter(|a| a.field == field)
            .map(|a| a.anchor.clone())
            .collect()
    }

    /// One string of the annotated node as renderable runs.
    pub fn runs<'a>(&'a self, node: &'a ContentNode, field: TextField) -> Vec<TextRun<'a>> {
        let Some(text) = node.text_field(field) else {
            return Vec::new();
        };
        runs(
            text,
            self.anchors
                .iter()
                .filter(|a| a.field == field)
                .map(|a| &a.anchor),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionAnnotations {
    pub image: Option<ImageRef>,
    pub nodes: Vec<NodeAnnotations>,
    pub internal_links: Vec<InternalLink>,
    pub children: Vec<SectionAnnotations>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedDocument {
    pub document: Document,
    pub sections: Vec<SectionAnnotations>,
}

impl EnhancedDocument {
    /// Sections paired with their annotations, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (&Section, &SectionAnnotations)> {
        let mut stack: Vec<(&Section, &SectionAnnotations)> = self
            .document
            .sections
            .iter()
            .zip(self.sections.iter())
            .rev()
            .collect();
        std::iter::from_fn(move || {
            let (section, notes) = stack.pop()?;
            stack.extend(section.children.iter().zip(notes.children.iter()).rev());
            Some((section, notes))
        })
    }

    /// Every anchor in the document, in reading order.
    pub fn anchors(&self) -> impl Iterator<Item = &NodeAnchor> {
        self.iter()
            .flat_map(|(_, notes)| notes.nodes.iter().flat_map(|n| n.anchors.iter()))
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors().count()
    }

    /// Anchors placed for one platform.
    pub fn anchor_count_for(&self, platform: &str) -> usize {
        self.anchors()
            .filter(|a| a.anchor.platform == platform)
            .count()
    }

    pub fn image_count(&self) -> usize {
        self.iter().filter(|(_, notes)| notes.image.is_some()).count()
    }
}
