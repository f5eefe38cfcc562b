//! Section body building
//!
//!     Groups the lines of one section body into content nodes:
//!
//!         - consecutive bullet lines          -> one BulletList
//!         - `csv` marker plus its rows        -> one Table (first row is the header)
//!         - `Label:` / `Label: value` lines   -> one KeyValueLine each
//!         - a run of plain lines, no blanks   -> one Paragraph, lines joined by a space
//!
//!     A blank line closes whatever block is open. Any line of a different shape closes the
//!     open block too, so a paragraph directly followed by bullets is two nodes.
//!
//!     Platform reviews get one extra pass once the body is complete: a `Pros:` list followed
//!     later by a `Cons:` list collapses into a single ProsConsBlock. See [merge_pros_cons].

use crate::page::ast::{ContentNode, StructuralWarning, WarningCode};
use crate::page::scanning::{LineToken, LineType};

use super::report;

#[derive(Debug, Default)]
struct TableBuilder {
    /// Line of the `csv` marker
    line_number: usize,
    /// (line number, cells)
    rows: Vec<(usize, Vec<String>)>,
}

impl TableBuilder {
    fn finish(self, warnings: &mut Vec<StructuralWarning>) -> Option<ContentNode> {
        let mut rows = self.rows.into_iter();
        let Some((_, header)) = rows.next() else {
            report(
                warnings,
                StructuralWarning::new(
                    self.line_number,
                    WarningCode::EmptyTable,
                    "csv marker is not followed by any rows",
                ),
            );
            return None;
        };

        let width = header.len();
        let rows = rows
            .map(|(line_number, mut cells)| {
                if cells.len() < width {
                    report(
                        warnings,
                        StructuralWarning::new(
                            line_number,
                            WarningCode::CsvRowPadded,
                            format!("row has {} of {} cells, padding", cells.len(), width),
                        ),
                    );
                    cells.resize(width, String::new());
                } else if cells.len() > width {
                    report(
                        warnings,
                        StructuralWarning::new(
                            line_number,
                            WarningCode::CsvRowTruncated,
                            format!("row has {} cells, header has {}", cells.len(), width),
                        ),
                    );
                    cells.truncate(width);
                }
                cells
            })
            .collect();

        Some(ContentNode::Table { header, rows })
    }
}

/// Accumulates the nodes of one section body
#[derive(Debug, Default)]
pub struct BodyBuilder {
    nodes: Vec<ContentNode>,
    paragraph: Vec<String>,
    bullets: Vec<String>,
    table: Option<TableBuilder>,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.paragraph.is_empty()
            && self.bullets.is_empty()
            && self.table.is_none()
    }

    pub fn feed(&mut self, line: &LineToken, warnings: &mut Vec<StructuralWarning>) {
        match line.line_type {
            LineType::Blank => self.flush(warnings),
            LineType::BulletItem => {
                self.flush_paragraph();
                self.flush_table(warnings);
                self.bullets.push(line.bullet_text().to_string());
            }
            LineType::CsvMarker => {
                self.flush(warnings);
                self.table = Some(TableBuilder {
                    line_number: line.line_number,
                    rows: Vec::new(),
                });
            }
            LineType::CsvRow => {
                self.flush_paragraph();
                self.flush_bullets();
                self.table
                    .get_or_insert_with(|| TableBuilder {
                        line_number: line.line_number,
                        rows: Vec::new(),
                    })
                    .rows
                    .push((line.line_number, line.csv_cells()));
            }
            LineType::MetadataLabel => {
                self.flush(warnings);
                if let Some((label, value)) = line.label() {
                    self.nodes.push(ContentNode::key_value(label, value));
                }
            }
            // Headings are handled by the parser; one reaching a body is kept as text.
            LineType::PlainText | LineType::Heading(_) => {
                self.flush_bullets();
                self.flush_table(warnings);
                self.paragraph.push(line.text.clone());
            }
        }
    }

    /// Add already built nodes, closing any open block first.
    pub fn extend(&mut self, nodes: Vec<ContentNode>, warnings: &mut Vec<StructuralWarning>) {
        self.flush(warnings);
        self.nodes.extend(nodes);
    }

    pub fn finish(mut self, warnings: &mut Vec<StructuralWarning>) -> Vec<ContentNode> {
        self.flush(warnings);
        self.nodes
    }

    fn flush(&mut self, warnings: &mut Vec<StructuralWarning>) {
        self.flush_paragraph();
        self.flush_bullets();
        self.flush_table(warnings);
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = std::mem::take(&mut self.paragraph).join(" ");
            self.nodes.push(ContentNode::Paragraph { text });
        }
    }

    fn flush_bullets(&mut self) {
        if !self.bullets.is_empty() {
            let items = std::mem::take(&mut self.bullets);
            self.nodes.push(ContentNode::BulletList { items });
        }
    }

    fn flush_table(&mut self, warnings: &mut Vec<StructuralWarning>) {
        if let Some(table) = self.table.take() {
            if let Some(node) = table.finish(warnings) {
                self.nodes.push(node);
            }
        }
    }
}

fn is_bare_label(node: &ContentNode, expected: &str) -> bool {
    matches!(node, ContentNode::KeyValueLine { label, value }
        if value.is_empty() && label.eq_ignore_ascii_case(expected))
}

/// Index of a bare `label:` line directly followed by a bullet list, searching from `from`.
fn find_labelled_list(nodes: &[ContentNode], label: &str, from: usize) -> Option<usize> {
    (from..nodes.len().saturating_sub(1)).find(|&i| {
        is_bare_label(&nodes[i], label) && matches!(nodes[i + 1], ContentNode::BulletList { .. })
    })
}

/// Collapse `Pros:` + list ... `Cons:` + list into one ProsConsBlock.
///
/// The block takes the position of the pros list. Only the first pair in order is merged;
/// a lone `Pros:` or `Cons:` list, or cons before pros, is left untouched.
pub fn merge_pros_cons(mut nodes: Vec<ContentNode>) -> Vec<ContentNode> {
    let Some(pros_at) = find_labelled_list(&nodes, "pros", 0) else {
        return nodes;
    };
    let Some(cons_at) = find_labelled_list(&nodes, "cons", pros_at + 2) else {
        return nodes;
    };

    let cons = match nodes.remove(cons_at + 1) {
        ContentNode::BulletList { items } => items,
        _ => unreachable!("checked by find_labelled_list"),
    };
    nodes.remove(cons_at);
    let pros = match nodes.remove(pros_at + 1) {
        ContentNode::BulletList { items } => items,
        _ => unreachable!("checked by find_labelled_list"),
    };
    nodes[pros_at] = ContentNode::ProsConsBlock { pros, cons };

    nodes
}
