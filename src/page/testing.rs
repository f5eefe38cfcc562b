//! Test support
//!
//!     Fluent assertions over parsed documents. Tests that walk `sections[0].children[1].body`
//!     by hand break whenever the tree shape changes and tend to check little more than
//!     counts; these read like the brief they describe and fail with a path to the node.
//!
//!     ```rust,ignore
//!     use pagesmith::page::testing::assert_doc;
//!
//!     assert_doc(&doc)
//!         .section_count(1)
//!         .section(0, |root| {
//!             root.heading("Best Bitcoin Casinos")
//!                 .child(0, |review| {
//!                     review
//!                         .kind(SectionType::PlatformReview)
//!                         .platform("Casino Royale")
//!                         .node(0, |n| {
//!                             n.assert_pros_cons().pros(&["Fast payouts"]);
//!                         });
//!                 });
//!         });
//!     ```

mod assertions;

pub use assertions::{
    ContentAssertion, DocumentAssertion, KeyValueAssertion, ListAssertion, ParagraphAssertion,
    ProsConsAssertion, SectionAssertion, TableAssertion,
};

use crate::page::ast::Document;

/// Start asserting on a document.
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}
