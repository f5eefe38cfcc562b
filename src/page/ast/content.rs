//! Content nodes
//!
//!     The blocks a section body is made of. Every node is owned by exactly one section.
//!
//!     Enhancement needs to address individual strings inside a node (the third bullet, the
//!     cell at row 2 column 1) so that anchor offsets can be mapped back to where the text
//!     lives. [TextField] names those strings and [ContentNode::text_fields] lists them in
//!     reading order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    /// Consecutive text lines joined with single spaces
    Paragraph { text: String },
    BulletList { items: Vec<String> },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// The `Pros:` and `Cons:` lists of a platform review, merged
    ProsConsBlock { pros: Vec<String>, cons: Vec<String> },
    /// `Label: value`, or a bare `Label:` sub-heading with an empty value
    KeyValueLine { label: String, value: String },
}

/// Address of one string inside a [ContentNode]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum TextField {
    Text,
    Item { index: usize },
    Header { column: usize },
    Cell { row: usize, column: usize },
    Pro { index: usize },
    Con { index: usize },
    Value,
}

impl ContentNode {
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentNode::Paragraph { text: text.into() }
    }

    pub fn key_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        ContentNode::KeyValueLine {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            ContentNode::Paragraph { .. } => "Paragraph",
            ContentNode::BulletList { .. } => "BulletList",
            ContentNode::Table { .. } => "Table",
            ContentNode::ProsConsBlock { .. } => "ProsConsBlock",
            ContentNode::KeyValueLine { .. } => "KeyValueLine",
        }
    }

    /// Every linkable string of this node, in reading order.
    ///
    /// Labels of key/value lines are structural and are not listed.
    pub fn text_fields(&self) -> Vec<(TextField, &str)> {
        match self {
            ContentNode::Paragraph { text } => vec![(TextField::Text, text.as_str())],
            ContentNode::BulletList { items } => items
                .iter()
                .enumerate()
                .map(|(index, item)| (TextField::Item { index }, item.as_str()))
                .collect(),
            ContentNode::Table { header, rows } => {
                let mut fields: Vec<(TextField, &str)> = header
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| (TextField::Header { column }, cell.as_str()))
                    .collect();
                for (row, cells) in rows.iter().enumerate() {
                    fields.extend(
                        cells
                            .iter()
                            .enumerate()
                            .map(|(column, cell)| (TextField::Cell { row, column }, cell.as_str())),
                    );
                }
                fields
            }
            ContentNode::ProsConsBlock { pros, cons } => pros
                .iter()
                .enumerate()
                .map(|(index, item)| (TextField::Pro { index }, item.as_str()))
                .chain(
                    cons.iter()
                        .enumerate()
                        .map(|(index, item)| (TextField::Con { index }, item.as_str())),
                )
                .collect(),
            ContentNode::KeyValueLine { value, .. } => vec![(TextField::Value, value.as_str())],
        }
    }

    /// Look up one string by its address.
    pub fn text_field(&self, field: TextField) -> Option<&str> {
        let text = match (self, field) {
            (ContentNode::Paragraph { text }, TextField::Text) => text,
            (ContentNode::BulletList { items }, TextField::Item { index }) => items.get(index)?,
            (ContentNode::Table { header, .. }, TextField::Header { column }) => {
                header.get(column)?
            }
            (ContentNode::Table { rows, .. }, TextField::Cell { row, column }) => {
                rows.get(row)?.get(column)?
            }
            (ContentNode::ProsConsBlock { pros, .. }, TextField::Pro { index }) => {
                pros.get(index)?
            }
            (ContentNode::ProsConsBlock { cons, .. }, TextField::Con { index }) => {
                cons.get(index)?
            }
            (ContentNode::KeyValueLine { value, .. }, TextField::Value) => value,
            _ => return None,
        };
        Some(text.as_str())
    }

    /// All text of the node joined by spaces, labels included.
    pub fn plain_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let ContentNode::KeyValueLine { label, .. } = self {
            parts.push(label);
        }
        parts.extend(self.text_fields().into_iter().map(|(_, text)| text));
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}
