//! Document model
//!
//!     The typed tree a brief parses into:
//!
//!         Document
//!           ├── Metadata
//!           └── Section (level 1)
//!                 ├── ContentNode*
//!                 └── Section*  (strictly deeper levels, recursively)
//!
//!     All types serialize with serde; the JSON form is what external renderers consume.

pub mod content;
pub mod diagnostics;
pub mod document;
pub mod section;

pub use content::{ContentNode, TextField};
pub use diagnostics::{StructuralWarning, WarningCode};
pub use document::{Document, FeaturedImage, Metadata, MetadataField, SectionIter};
pub use section::{Section, SectionType};
