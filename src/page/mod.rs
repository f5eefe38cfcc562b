//! Main module for pagesmith library functionality

pub mod ast;
pub mod classifying;
pub mod enhancing;
pub mod error;
pub mod formats;
pub mod parsing;
pub mod scanning;
pub mod testing;
pub mod token;

pub use ast::{ContentNode, Document, Metadata, Section, SectionType};
pub use enhancing::{enhance, EnhancedDocument};
pub use error::ConfigError;
pub use parsing::parse_document;
