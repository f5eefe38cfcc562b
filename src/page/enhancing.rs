//! Enhancement
//!
//!     Takes a parsed [Document](crate::page::ast::Document) and decides where images and
//!     links go, without changing a single character of its text. The result is an
//!     [EnhancedDocument]: the document plus a parallel tree of annotations that a renderer
//!     applies.
//!
//!     Inputs are read-only and supplied by the caller:
//!         - an [ImageLibrary] of titled images
//!         - [LinkRecord]s mapping platform names to affiliate urls, resolved into a
//!           [LinkTable] against the configured platform list
//!         - optionally a [PageIndex] for internal links
//!
//!     Enhancement is deterministic: the same document and inputs give the same annotations.
//!
//!     Modules:
//!         - [options]: validated settings
//!         - [images]: the image scorer
//!         - [affiliate]: platform mention linking and occurrence caps
//!         - [internal_links]: the page index seam
//!         - [model]: the annotation tree
//!         - [enhancer]: the walk that ties them together

pub mod affiliate;
pub mod enhancer;
pub mod images;
pub mod internal_links;
pub mod model;
pub mod options;

pub use affiliate::{
    annotate, Anchor, AnnotatedText, LinkOccurrenceCounter, LinkRecord, LinkTable, TextRun,
    SPONSORED_REL,
};
pub use enhancer::{enhance, Enhancer};
pub use images::{ImageLibrary, ImageMatcher, ImageRecord, ImageRef};
pub use internal_links::{InternalLink, PageEntry, PageIndex, TitleIndex};
pub use model::{EnhancedDocument, NodeAnchor, NodeAnnotations, SectionAnnotations};
pub use options::{
    EnhanceOptions, ImageMatchOptions, KeywordCategory, LinkOptions, RoleWeights,
    DEFAULT_OCCURRENCE_CAP,
};
