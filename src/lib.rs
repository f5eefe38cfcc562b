//! # pagesmith
//!
//! Turns loosely formatted content briefs into a typed document tree and annotates that tree
//! with illustrative images and capped affiliate links.
//!
//! Pipeline
//!
//!     raw text -> scanning -> parsing -> Document -> enhancing -> EnhancedDocument
//!
//!     Rendering the enhanced tree to HTML is left to the caller. The only formats shipped here
//!     are JSON (through serde) and treeviz, a one line per node debug view.
//!
//! For testing helpers, see the [testing module](page::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod page;

pub use page::{enhance, parse_document, ConfigError, Document, EnhancedDocument};
