//! Output formats
//!
//! Serializations of a parsed [Document] for people and tools:
//!     - [treeviz]: one line per node, for eyeballing the structure
//!     - json: the full tree via serde

pub mod treeviz;

pub use treeviz::to_treeviz_str;

use crate::page::ast::Document;
use crate::page::enhancing::EnhancedDocument;

pub fn to_json_str(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

pub fn enhanced_to_json_str(doc: &EnhancedDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}
