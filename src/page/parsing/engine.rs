//! Parser state machine
//!
//!     Lines are fed one at a time. The parser moves through three states:
//!
//!         Meta ──(`Content` line or any heading)──> BetweenSections ──(heading)──> InSection
//!                                                          ^                           │
//!                                                          └───────── (never) ─────────┘
//!
//!     Once a section is open there is always one: the level-1 root stays open until the end.
//!
//! Sections
//!
//!     Open sections live on a stack, deepest on top. A heading of level n closes every open
//!     section of level >= n, attaching each to the one below it, then opens a new section.
//!     Classification of a section waits for its first body line (the csv rule needs it) and
//!     is forced when the section closes or gets its first child without having seen one.
//!
//! Recovery
//!
//!     The tree always has exactly one level-1 root once anything has been parsed:
//!         - a heading deeper than 1 before any level-1 heading gets a synthesized root above it
//!         - body text before any heading goes into the root's body
//!         - a second level-1 heading is demoted to level 2
//!     Each of these is reported as a structural warning.

use crate::page::ast::{Document, Metadata, Section, SectionType, StructuralWarning, WarningCode};
use crate::page::classifying::{classify, ClassifierInput, FirstBodyLine};
use crate::page::scanning::{Demotion, LineToken, LineType};

use super::body::{merge_pros_cons, BodyBuilder};
use super::metadata::MetadataCollector;
use super::report;

/// The line that ends the metadata block
pub const CONTENT_MARKER: &str = "Content";

/// Observable parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Meta,
    BetweenSections,
    InSection { level: u8, type_pending: bool },
}

#[derive(Debug)]
struct OpenSection {
    section: Section,
    /// None until classified
    section_type: Option<SectionType>,
    parent: Option<(SectionType, u8)>,
    body: BodyBuilder,
}

impl OpenSection {
    fn new(
        level: u8,
        heading_text: String,
        line_number: usize,
        parent: Option<(SectionType, u8)>,
    ) -> Self {
        Self {
            section: Section::new(level, heading_text, SectionType::Standard).at(line_number),
            section_type: None,
            parent,
            body: BodyBuilder::new(),
        }
    }

    fn level(&self) -> u8 {
        self.section.level
    }

    fn resolve_type(&mut self, first_body_line: Option<FirstBodyLine>) -> SectionType {
        *self.section_type.get_or_insert_with(|| {
            classify(&ClassifierInput {
                heading_text: &self.section.heading_text,
                level: self.section.level,
                first_body_line,
                parent: self.parent,
            })
        })
    }

    fn close(mut self, warnings: &mut Vec<StructuralWarning>) -> Section {
        let section_type = self.resolve_type(None);
        let mut body = self.body.finish(warnings);
        if section_type == SectionType::PlatformReview {
            body = merge_pros_cons(body);
        }
        self.section.section_type = section_type;
        self.section.body = body;
        self.section
    }
}

/// Line-driven document parser
#[derive(Debug)]
pub struct Parser {
    in_meta: bool,
    meta: MetadataCollector,
    metadata: Metadata,
    stack: Vec<OpenSection>,
    sections: Vec<Section>,
    /// Body text seen before any heading
    preamble: BodyBuilder,
    warnings: Vec<StructuralWarning>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            in_meta: true,
            meta: MetadataCollector::new(),
            metadata: Metadata::default(),
            stack: Vec::new(),
            sections: Vec::new(),
            preamble: BodyBuilder::new(),
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> ParserState {
        if self.in_meta {
            return ParserState::Meta;
        }
        match self.stack.last() {
            Some(top) => ParserState::InSection {
                level: top.level(),
                type_pending: top.section_type.is_none(),
            },
            None => ParserState::BetweenSections,
        }
    }

    pub fn warnings(&self) -> &[StructuralWarning] {
        &self.warnings
    }

    pub fn feed(&mut self, line: LineToken) {
        if let Some(demotion) = line.demoted {
            self.report_demotion(&line, demotion);
        }

        if self.in_meta {
            if line.text == CONTENT_MARKER {
                self.end_meta();
                return;
            }
            if !matches!(line.line_type, LineType::Heading(_)) {
                self.meta.feed(&line);
                return;
            }
            self.end_meta();
        }

        match line.line_type {
            LineType::Heading(level) => self.open_heading(level, &line),
            _ => self.feed_body(&line),
        }
    }

    pub fn finish(mut self) -> Document {
        if self.in_meta {
            self.end_meta();
        }
        if self.stack.is_empty() && !self.preamble.is_empty() {
            self.open_synthesized_root();
        }
        while let Some(open) = self.stack.pop() {
            self.attach(open);
        }

        Document {
            metadata: self.metadata,
            sections: self.sections,
            warnings: self.warnings,
        }
    }

    fn end_meta(&mut self) {
        self.in_meta = false;
        self.metadata = std::mem::take(&mut self.meta).finish();
    }

    fn feed_body(&mut self, line: &LineToken) {
        let Some(top) = self.stack.last_mut() else {
            if line.is_blank() {
                return;
            }
            if self.preamble.is_empty() {
                report(
                    &mut self.warnings,
                    StructuralWarning::new(
                        line.line_number,
                        WarningCode::OrphanContent,
                        "text before the first heading, keeping it under the root section",
                    ),
                );
            }
            self.preamble.feed(line, &mut self.warnings);
            return;
        };

        if !line.is_blank() && top.section_type.is_none() {
            let first = if line.line_type == LineType::CsvMarker {
                FirstBodyLine::CsvMarker
            } else {
                FirstBodyLine::Other
            };
            top.resolve_type(Some(first));
        }
        top.body.feed(line, &mut self.warnings);
    }

    fn open_heading(&mut self, level: u8, line: &LineToken) {
        let heading_text = line.heading_text().to_string();
        let mut level = level;

        match (self.stack.is_empty() && self.sections.is_empty(), level) {
            (true, 1) => {
                let mut root = OpenSection::new(1, heading_text, line.line_number, None);
                let preamble = std::mem::take(&mut self.preamble).finish(&mut self.warnings);
                root.body.extend(preamble, &mut self.warnings);
                self.stack.push(root);
                return;
            }
            (true, _) => {
                report(
                    &mut self.warnings,
                    StructuralWarning::new(
                        line.line_number,
                        WarningCode::OrphanHeading,
                        format!("level {} heading before any level 1 heading", level),
                    ),
                );
                self.open_synthesized_root();
            }
            (false, 1) => {
                report(
                    &mut self.warnings,
                    StructuralWarning::new(
                        line.line_number,
                        WarningCode::DuplicateRoot,
                        "document already has a level 1 heading, demoting to level 2",
                    ),
                );
                level = 2;
            }
            (false, _) => {}
        }

        while self.stack.last().is_some_and(|top| top.level() >= level) {
            if let Some(open) = self.stack.pop() {
                self.attach(open);
            }
        }

        let parent = self.stack.last_mut().map(|top| {
            let parent_type = top.resolve_type(None);
            (parent_type, top.level())
        });
        self.stack
            .push(OpenSection::new(level, heading_text, line.line_number, parent));
    }

    fn open_synthesized_root(&mut self) {
        let title = self.metadata.fallback_title().to_string();
        let mut root = OpenSection::new(1, title, 0, None);
        let preamble = std::mem::take(&mut self.preamble).finish(&mut self.warnings);
        let first = preamble.first().map(|_| FirstBodyLine::Other);
        root.body.extend(preamble, &mut self.warnings);
        root.resolve_type(first);
        self.stack.push(root);
    }

    /// Close a popped section and hang it under the new top of the stack.
    fn attach(&mut self, open: OpenSection) {
        let section = open.close(&mut self.warnings);
        match self.stack.last_mut() {
            Some(parent) => parent.section.children.push(section),
            None => self.sections.push(section),
        }
    }

    fn report_demotion(&mut self, line: &LineToken, demotion: Demotion) {
        let (code, message) = match demotion {
            Demotion::MalformedLevel(level) => (
                WarningCode::MalformedHeading,
                format!("heading level {} is outside 1..6, keeping line as text", level),
            ),
            Demotion::EmptyHeading => (
                WarningCode::EmptyHeading,
                "heading marker without text, keeping line as text".to_string(),
            ),
        };
        report(
            &mut self.warnings,
            StructuralWarning::new(line.line_number, code, message),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::scanning::scan;

    fn feed_all(parser: &mut Parser, source: &str) {
        for line in scan(source) {
            parser.feed(line);
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut parser = Parser::new();
        assert_eq!(parser.state(), ParserState::Meta);

        feed_all(&mut parser, "Target Keyword: x\nContent");
        assert_eq!(parser.state(), ParserState::BetweenSections);

        feed_all(&mut parser, "Title (h1)");
        assert_eq!(
            parser.state(),
            ParserState::InSection {
                level: 1,
                type_pending: true
            }
        );

        feed_all(&mut parser, "Some text");
        assert_eq!(
            parser.state(),
            ParserState::InSection {
                level: 1,
                type_pending: false
            }
        );

        feed_all(&mut parser, "Sub (h2)");
        assert_eq!(
            parser.state(),
            ParserState::InSection {
                level: 2,
                type_pending: true
            }
        );
    }

    #[test]
    fn test_heading_ends_meta_without_content_marker() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "Target Geo: UK\nTitle (h1)");
        let doc = parser.finish();
        assert_eq!(doc.metadata.target_geo, "UK");
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_siblings_and_nesting() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "R (h1)\nA (h2)\nA1 (h3)\nA2 (h3)\nB (h2)");
        let doc = parser.finish();
        let root = &doc.sections[0];
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(root.children[1].heading_text, "B");
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_skipped_level_nests_under_nearest_shallower() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "R (h1)\nA (h2)\nDeep (h4)\nC (h3)");
        let doc = parser.finish();
        let a = &doc.sections[0].children[0];
        let headings: Vec<&str> = a.children.iter().map(|s| s.heading_text.as_str()).collect();
        assert_eq!(headings, vec!["Deep", "C"]);
    }

    #[test]
    fn test_orphan_heading_gets_synthesized_root() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "Meta Title: Fallback\nContent\nIntro (h2)\nText");
        let doc = parser.finish();
        assert_eq!(doc.sections.len(), 1);
        let root = &doc.sections[0];
        assert_eq!(root.level, 1);
        assert_eq!(root.heading_text, "Fallback");
        assert_eq!(root.line_number, 0);
        assert_eq!(root.children[0].heading_text, "Intro");
        assert_eq!(doc.warnings[0].code, WarningCode::OrphanHeading);
    }

    #[test]
    fn test_second_root_is_demoted() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "One (h1)\nTwo (h1)");
        let doc = parser.finish();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].children[0].level, 2);
        assert_eq!(doc.warnings[0].code, WarningCode::DuplicateRoot);
    }

    #[test]
    fn test_preamble_moves_into_root() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "Content\nStray intro\n\nTitle (h1)\nBody");
        let doc = parser.finish();
        let root = &doc.sections[0];
        assert_eq!(root.heading_text, "Title");
        assert_eq!(root.body.len(), 2);
        assert_eq!(doc.warnings[0].code, WarningCode::OrphanContent);
    }

    #[test]
    fn test_malformed_heading_demoted_to_paragraph() {
        let mut parser = Parser::new();
        feed_all(&mut parser, "R (h1)\nNot a heading (h9)");
        let doc = parser.finish();
        assert_eq!(
            doc.sections[0].body,
            vec![crate::page::ast::ContentNode::paragraph("Not a heading (h9)")]
        );
        assert_eq!(doc.warnings[0].code, WarningCode::MalformedHeading);
        assert_eq!(doc.warnings[0].line, 2);
    }

    #[test]
    fn test_faq_children_see_parent_type() {
        let mut parser = Parser::new();
        feed_all(
            &mut parser,
            "R (h1)\nFrequently Asked Questions (h2)\nIs it legal? (h3)\nYes.\nDeeper (h4)",
        );
        let doc = parser.finish();
        let faq = &doc.sections[0].children[0];
        assert_eq!(faq.section_type, SectionType::FAQGroup);
        assert_eq!(faq.children[0].section_type, SectionType::FAQItem);
        assert_eq!(faq.children[0].children[0].section_type, SectionType::Standard);
    }
}
