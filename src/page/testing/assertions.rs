//! Assertion types, one module per kind of node

mod content;
mod document;
mod section;

pub use content::{
    ContentAssertion, KeyValueAssertion, ListAssertion, ParagraphAssertion, ProsConsAssertion,
    TableAssertion,
};
pub use document::DocumentAssertion;
pub use section::SectionAssertion;

use crate::page::ast::{ContentNode, Section};

pub(super) fn summarize_nodes(nodes: &[ContentNode]) -> String {
    nodes
        .iter()
        .map(|node| node.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn summarize_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| format!("{:?}", s.heading_text))
        .collect::<Vec<_>>()
        .join(", ")
}
