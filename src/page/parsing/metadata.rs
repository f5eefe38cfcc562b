//! Metadata block
//!
//!     Everything before the `Content` marker (or the first heading) is the metadata block.
//!     Values come in two forms:
//!
//!         Target Keyword: Best Bitcoin Casino      inline
//!
//!         URL Slug:                                on the following lines
//!         /best-bitcoin-casino/
//!
//!     A label with no inline value owns every following line up to the next label. Blank
//!     lines inside are kept, blank lines at either end are dropped, so multi-paragraph notes
//!     survive intact. Lines that belong to no label are ignored.

use crate::page::ast::Metadata;
use crate::page::scanning::{LineToken, LineType};

#[derive(Debug)]
struct OpenLabel {
    label: String,
    lines: Vec<String>,
}

/// Collects metadata while the parser is in its metadata phase
#[derive(Debug, Default)]
pub struct MetadataCollector {
    metadata: Metadata,
    open: Option<OpenLabel>,
}

impl MetadataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &LineToken) {
        match (line.line_type, line.label()) {
            (LineType::MetadataLabel, Some((label, value))) => {
                self.close();
                if value.is_empty() {
                    self.open = Some(OpenLabel {
                        label: label.to_string(),
                        lines: Vec::new(),
                    });
                } else {
                    self.metadata.insert(label, value.to_string());
                }
            }
            (LineType::Blank, _) => {
                if let Some(open) = self.open.as_mut() {
                    open.lines.push(String::new());
                }
            }
            _ => match self.open.as_mut() {
                Some(open) => open.lines.push(line.text.clone()),
                None => tracing::debug!(
                    line = line.line_number,
                    text = line.text.as_str(),
                    "ignoring unlabelled metadata line"
                ),
            },
        }
    }

    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            let value = open.lines.join("\n").trim().to_string();
            self.metadata.insert(&open.label, value);
        }
    }

    pub fn finish(mut self) -> Metadata {
        self.close();
        self.metadata
    }
}
