//! End-to-end parsing of briefs, checked with the fluent assertions

use pagesmith::page::ast::{SectionType, WarningCode};
use pagesmith::page::testing::assert_doc;
use pagesmith::parse_document;
use rstest::rstest;

#[test]
fn test_comparison_table_under_root() {
    let doc = parse_document(
        "Target Keyword: Best Bitcoin Casino\n\
         Content\n\
         Best Bitcoin Casinos (h1)\n\
         Intro.\n\
         \n\
         Top Platforms (h2)\n\
         csv\n\
         Casino,Bonus\n\
         Stake,200%\n\
         Cloudbet,100%\n",
    );

    assert_doc(&doc)
        .metadata("Target Keyword", "Best Bitcoin Casino")
        .section_count(1)
        .no_warnings()
        .section(0, |root| {
            root.kind(SectionType::Standard)
                .level(1)
                .child_count(1)
                .child(0, |table| {
                    table
                        .kind(SectionType::ComparisonTable)
                        .heading("Top Platforms")
                        .node_count(1)
                        .node(0, |n| {
                            n.assert_table()
                                .header(&["Casino", "Bonus"])
                                .row_count(2)
                                .row(1, &["Cloudbet", "100%"]);
                        });
                });
        });
}

#[test]
fn test_disclaimer_heading() {
    let doc = parse_document(
        "Guide (h1)\n\nImportant Notice for UK Readers (disclaimer box) (h2)\n1. Stake - Fast\n",
    );
    assert_doc(&doc).section(0, |root| {
        root.child(0, |s| {
            s.heading("Important Notice for UK Readers (disclaimer box)")
                .kind(SectionType::Disclaimer);
        });
    });
}

#[test]
fn test_review_with_pros_and_cons() {
    let doc = parse_document(
        "Guide (h1)\n\
         Reviews (h2)\n\
         1. Casino Royale - Fast Payouts (h3)\n\
         Casino Royale is quick.\n\
         \n\
         Pros:\n\
         • Fast payouts\n\
         • Big bonus\n\
         Cons:\n\
         • Few games\n\
         \n\
         Verdict: Worth a try.\n",
    );

    assert_doc(&doc).section(0, |root| {
        root.child(0, |reviews| {
            reviews.child(0, |review| {
                review
                    .kind(SectionType::PlatformReview)
                    .platform("Casino Royale")
                    .node_count(3)
                    .node(0, |n| {
                        n.assert_paragraph().text("Casino Royale is quick.");
                    })
                    .node(1, |n| {
                        n.assert_pros_cons()
                            .pros(&["Fast payouts", "Big bonus"])
                            .cons(&["Few games"]);
                    })
                    .node(2, |n| {
                        n.assert_key_value().label("Verdict").value("Worth a try.");
                    });
            });
        });
    });
}

#[test]
fn test_empty_input() {
    let doc = parse_document("");
    assert!(doc.metadata.is_empty());
    assert_doc(&doc).section_count(0).no_warnings();
}

#[test]
fn test_faq_items() {
    let doc = parse_document(
        "Guide (h1)\nFrequently Asked Questions (h2)\nIs it safe? (h3)\nYes.\nHow fast? (h3)\nVery.\n",
    );
    assert_doc(&doc).section(0, |root| {
        root.child(0, |faq| {
            faq.kind(SectionType::FAQGroup)
                .child_count(2)
                .child(0, |q| {
                    q.kind(SectionType::FAQItem).heading("Is it safe?");
                })
                .child(1, |q| {
                    q.kind(SectionType::FAQItem).node(0, |n| {
                        n.assert_paragraph().text("Very.");
                    });
                });
        });
    });
}

#[test]
fn test_recovery_without_h1() {
    let doc = parse_document("Meta Title: Crypto Guide\nContent\nSection (h2)\nText.\n");
    assert_doc(&doc)
        .section_count(1)
        .warning(3, WarningCode::OrphanHeading)
        .section(0, |root| {
            root.heading("Crypto Guide").level(1).line(0).child(0, |s| {
                s.heading("Section").level(2).line(3);
            });
        });
}

#[test]
fn test_second_root_is_demoted() {
    let doc = parse_document("One (h1)\nTwo (h1)\n");
    assert_doc(&doc)
        .section_count(1)
        .warning(2, WarningCode::DuplicateRoot)
        .section(0, |root| {
            root.child(0, |s| {
                s.heading("Two").level(2);
            });
        });
}

#[rstest]
#[case("Broken (h9)", WarningCode::MalformedHeading)]
#[case("(h2)", WarningCode::EmptyHeading)]
fn test_bad_headings_become_text(#[case] line: &str, #[case] code: WarningCode) {
    let source = format!("Guide (h1)\n{}\n", line);
    let doc = parse_document(&source);
    assert_doc(&doc).warning(2, code).section(0, |root| {
        root.child_count(0).node(0, |n| {
            n.assert_paragraph().text(line);
        });
    });
}

#[test]
fn test_ragged_csv_rows() {
    let doc = parse_document("Guide (h1)\nTable (h2)\ncsv\nA,B,C\n1,2\n1,2,3,4\n");
    assert_doc(&doc)
        .warning(5, WarningCode::CsvRowPadded)
        .warning(6, WarningCode::CsvRowTruncated)
        .section(0, |root| {
            root.child(0, |t| {
                t.node(0, |n| {
                    n.assert_table()
                        .rectangular()
                        .row(0, &["1", "2", ""])
                        .row(1, &["1", "2", "3"]);
                });
            });
        });
}

#[test]
fn test_platform_names() {
    let doc = parse_document(
        "Guide (h1)\nTop (h2)\ncsv\nCasino,Bonus\nStake,1\nRoobet,2\n\n1. Cloudbet - Big (h3)\nText.\n2. stake - Again (h3)\n",
    );
    assert_eq!(doc.platform_names(), vec!["Cloudbet", "stake", "Roobet"]);
}
