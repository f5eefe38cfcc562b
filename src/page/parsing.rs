//! Parsing
//!
//!     Consumes the scanner's line stream and builds a [Document]. Parsing is total: every
//!     input produces a document, malformed pieces degrade to plain text and are reported as
//!     [StructuralWarning]s on the document. Empty input gives an empty document.
//!
//!     The work is split three ways:
//!         - [metadata]: the labelled block before `Content`
//!         - [engine]: the state machine that opens and closes sections
//!         - [body]: grouping body lines into content nodes
//!
//!     Parsing is a pure function of the input text; parsing the same text twice yields equal
//!     documents.

pub mod body;
pub mod engine;
pub mod metadata;

pub use engine::{Parser, ParserState, CONTENT_MARKER};

use crate::page::ast::{Document, StructuralWarning};
use crate::page::scanning::scan;

/// Parse a brief into a document.
pub fn parse_document(source: &str) -> Document {
    let mut parser = Parser::new();
    for line in scan(source) {
        parser.feed(line);
    }
    let document = parser.finish();

    tracing::debug!(
        sections = document.section_count(),
        warnings = document.warnings.len(),
        "parsed document"
    );
    document
}

/// Log a warning and keep it.
pub(crate) fn report(warnings: &mut Vec<StructuralWarning>, warning: StructuralWarning) {
    tracing::warn!(
        line = warning.line,
        code = warning.code.as_str(),
        "{}",
        warning.message
    );
    warnings.push(warning);
}
