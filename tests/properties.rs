//! Property-based tests for parsing and linking
//!
//! Briefs are generated from the line shapes the scanner knows about, mixed with noise, so
//! the parser sees headings at every level, broken markers, csv blocks and labels in any
//! order.

use pagesmith::page::ast::Section;
use pagesmith::page::enhancing::{
    annotate, LinkOccurrenceCounter, LinkOptions, LinkRecord, LinkTable,
};
use pagesmith::parse_document;
use proptest::prelude::*;

fn brief_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ]{0,12} \\(h[0-9]\\)",
        "[0-9]\\. [A-Z][a-z]{2,6} - [a-z ]{1,10} \\(h3\\)",
        "• [A-Za-z ]{0,12}",
        Just("csv".to_string()),
        "[a-z]{1,4}(,[a-z ]{0,4}){0,3}",
        "[A-Z][a-z]{1,6}: [a-z ]{0,8}",
        Just("Pros:".to_string()),
        Just("Cons:".to_string()),
        Just("Content".to_string()),
        Just(String::new()),
        "[A-Za-z0-9 .,:()\\-]{0,24}",
    ]
}

fn brief() -> impl Strategy<Value = String> {
    prop::collection::vec(brief_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

fn check_levels(section: &Section) {
    assert!((1..=6).contains(&section.level));
    for child in &section.children {
        assert!(
            child.level > section.level,
            "child '{}' (h{}) under '{}' (h{})",
            child.heading_text,
            child.level,
            section.heading_text,
            section.level
        );
        check_levels(child);
    }
}

const PLATFORMS: &[&str] = &["Stake", "Stake Casino", "Bet365", "888"];

fn table(cap: usize) -> LinkTable {
    let records: Vec<LinkRecord> = PLATFORMS
        .iter()
        .map(|p| LinkRecord::new(*p, format!("https://go.example/{}", p.len())))
        .collect();
    let options = LinkOptions::new(PLATFORMS.iter().map(|p| p.to_string()).collect()).with_cap(cap);
    LinkTable::new(&records, &options).expect("valid options")
}

fn linkable_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("Stake".to_string()),
            Just("stake casino".to_string()),
            Just("BET365".to_string()),
            Just("888".to_string()),
            Just("Mistake".to_string()),
            "[a-z]{1,8}",
            "[ .,!]{1,2}",
        ],
        0..30,
    )
    .prop_map(|words| words.join(" "))
}

/// Text built from known mentions and filler that can never match, with the platform each
/// mention should resolve to.
fn counted_mentions() -> impl Strategy<Value = (String, Vec<&'static str>)> {
    prop::collection::vec(
        prop_oneof![
            Just(("Stake".to_string(), Some("Stake"))),
            Just(("stake casino".to_string(), Some("Stake Casino"))),
            Just(("BET365".to_string(), Some("Bet365"))),
            Just(("888".to_string(), Some("888"))),
            Just(("Mistake".to_string(), None::<&str>)),
            "[qxz]{1,8}".prop_map(|word| (word, None::<&str>)),
            "[.,!]{1,2}".prop_map(|word| (word, None::<&str>)),
        ],
        0..30,
    )
    .prop_map(|words| {
        let mentions = words.iter().filter_map(|(_, platform)| *platform).collect();
        let text = words
            .into_iter()
            .map(|(word, _)| word)
            .collect::<Vec<_>>()
            .join(" ");
        (text, mentions)
    })
}

proptest! {
    #[test]
    fn parsing_is_deterministic(source in brief()) {
        prop_assert_eq!(parse_document(&source), parse_document(&source));
    }

    #[test]
    fn parsing_never_panics(source in "\\PC*(\n\\PC*){0,10}") {
        let _ = parse_document(&source);
    }

    #[test]
    fn heading_tree_is_well_formed(source in brief()) {
        let doc = parse_document(&source);
        prop_assert!(doc.sections.len() <= 1);
        for root in &doc.sections {
            prop_assert_eq!(root.level, 1);
            check_levels(root);
        }
    }

    #[test]
    fn tables_are_rectangular(source in brief()) {
        let doc = parse_document(&source);
        for section in doc.iter_sections() {
            for node in &section.body {
                if let pagesmith::page::ContentNode::Table { header, rows } = node {
                    for row in rows {
                        prop_assert_eq!(row.len(), header.len());
                    }
                }
            }
        }
    }

    #[test]
    fn anchors_never_overlap(text in linkable_text(), cap in 0usize..4) {
        let table = table(cap);
        let mut counter = LinkOccurrenceCounter::new();
        let result = annotate(&text, &table, &mut counter);

        prop_assert_eq!(&result.text, &text);
        for pair in result.anchors.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for anchor in &result.anchors {
            prop_assert!(text[anchor.start..anchor.end].eq_ignore_ascii_case(&anchor.platform));
        }
    }

    #[test]
    fn anchors_are_min_of_cap_and_mentions(
        (text, mentions) in counted_mentions(),
        cap in 0usize..4,
    ) {
        let table = table(cap);
        let mut counter = LinkOccurrenceCounter::new();
        let result = annotate(&text, &table, &mut counter);

        for platform in PLATFORMS {
            let expected = mentions.iter().filter(|m| *m == platform).count();
            let placed = result.anchors.iter().filter(|a| a.platform == *platform).count();
            prop_assert_eq!(placed, expected.min(cap), "platform {}", platform);
            prop_assert_eq!(counter.count(platform), expected.min(cap));
        }
        prop_assert_eq!(result.anchors.len() + result.capped, mentions.len());
    }

    #[test]
    fn annotating_twice_from_fresh_counters_agrees(text in linkable_text()) {
        let table = table(3);
        let first = annotate(&text, &table, &mut LinkOccurrenceCounter::new());
        let second = annotate(&text, &table, &mut LinkOccurrenceCounter::new());
        prop_assert_eq!(first, second);
    }
}
