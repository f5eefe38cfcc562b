//! Affiliate linking
//!
//!     Turns platform mentions into anchors. The configured platform names are resolved
//!     against the caller's link records once, when the [LinkTable] is built; after that,
//!     annotating text is a single regex pass.
//!
//!     Matching rules:
//!         - Case-insensitive, whole word: a name only matches where it is not part of a
//!           longer word.
//!         - Longest name first: where "Bet365 Casino" and "Bet365" both match at the same
//!           place, the longer one wins.
//!         - A matched span is consumed. Scanning resumes after it, so anchors never overlap
//!           and never nest.
//!         - Each platform gets at most its cap of anchors per document. Mentions past the cap
//!           are still consumed but stay plain text.
//!
//!     The cap is counted by a [LinkOccurrenceCounter] owned by the caller, one per document,
//!     so that text from many sections shares the same budget.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::page::enhancing::options::LinkOptions;
use crate::page::error::ConfigError;

/// `rel` attribute every affiliate anchor carries
pub const SPONSORED_REL: &str = "nofollow sponsored";

/// Compiled size allowed for the platform matcher
const PATTERN_SIZE_LIMIT: usize = 32 * (1 << 20);

/// A platform and where its affiliate link points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(alias = "title")]
    pub platform_name: String,
    pub target_url: String,
}

impl LinkRecord {
    pub fn new(platform_name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            target_url: target_url.into(),
        }
    }
}

/// One linkable platform, after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Name as configured; this is what gets matched
    pub platform: String,
    pub target_url: String,
    pub cap: usize,
}

/// Resolved platforms plus the compiled matcher. The default table links nothing.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    /// Sorted longest name first; capture group `i + 1` belongs to `targets[i]`
    targets: Vec<LinkTarget>,
    pattern: Option<Regex>,
}

impl LinkTable {
    /// Resolve every configured platform against the link records.
    ///
    /// A platform resolves to the first record whose name equals it exactly, else ignoring
    /// case, else the first record whose name contains it (or is contained in it), ignoring
    /// case. Platforms with no record are skipped with a warning.
    pub fn new(records: &[LinkRecord], options: &LinkOptions) -> Result<Self, ConfigError> {
        let options = options.clone().validate()?;

        let mut targets = Vec::new();
        for platform in &options.platforms {
            let Some(record) = resolve(platform, records) else {
                tracing::warn!(
                    platform = platform.as_str(),
                    "no affiliate link for platform"
                );
                continue;
            };
            let target_url = record.target_url.trim();
            if target_url.is_empty() {
                return Err(ConfigError::BlankTargetUrl(platform.clone()));
            }
            targets.push(LinkTarget {
                platform: platform.clone(),
                target_url: target_url.to_string(),
                cap: options.cap_for(platform),
            });
        }

        // stable: equal lengths keep configured order
        targets.sort_by_key(|t| std::cmp::Reverse(t.platform.chars().count()));

        let pattern = compile_pattern(&targets, PATTERN_SIZE_LIMIT)?;

        Ok(Self { targets, pattern })
    }

    /// Link every record under its own name.
    pub fn from_records(records: &[LinkRecord]) -> Result<Self, ConfigError> {
        let mut platforms: Vec<String> = Vec::new();
        for record in records {
            let name = record.platform_name.trim();
            if !platforms.iter().any(|p| p.eq_ignore_ascii_case(name)) {
                platforms.push(name.to_string());
            }
        }
        Self::new(records, &LinkOptions::new(platforms))
    }

    pub fn targets(&self) -> &[LinkTarget] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn resolve<'r>(platform: &str, records: &'r [LinkRecord]) -> Option<&'r LinkRecord> {
    let lower = platform.to_lowercase();
    records
        .iter()
        .find(|r| r.platform_name.trim() == platform)
        .or_else(|| {
            records
                .iter()
                .find(|r| r.platform_name.trim().to_lowercase() == lower)
        })
        .or_else(|| {
            records.iter().find(|r| {
                let name = r.platform_name.trim().to_lowercase();
                !name.is_empty() && (name.contains(&lower) || lower.contains(&name))
            })
        })
}

/// One alternation over every target, capture group `i + 1` for `targets[i]`.
fn compile_pattern(
    targets: &[LinkTarget],
    size_limit: usize,
) -> Result<Option<Regex>, ConfigError> {
    if targets.is_empty() {
        return Ok(None);
    }
    let alternation = targets
        .iter()
        .map(|t| format!("({})", word_pattern(&t.platform)))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
        .map(Some)
        .map_err(|err| ConfigError::LinkPattern(err.to_string()))
}

/// Escaped name, with word boundaries on the sides that start or end in a word character.
fn word_pattern(name: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let starts = name.chars().next().is_some_and(is_word);
    let ends = name.chars().last().is_some_and(is_word);
    format!(
        "{}{}{}",
        if starts { r"\b" } else { "" },
        regex::escape(name),
        if ends { r"\b" } else { "" }
    )
}

/// Anchors placed so far in one document, per platform
#[derive(Debug, Default, Clone)]
pub struct LinkOccurrenceCounter {
    counts: HashMap<String, usize>,
}

impl LinkOccurrenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, platform: &str) -> usize {
        self.counts.get(platform).copied().unwrap_or(0)
    }

    /// Claim one anchor for the platform if it is under its cap.
    pub fn try_claim(&mut self, target: &LinkTarget) -> bool {
        let count = self.counts.entry(target.platform.clone()).or_insert(0);
        if *count >= target.cap {
            return false;
        }
        *count += 1;
        true
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// A linked span. Offsets are byte offsets into the annotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub start: usize,
    pub end: usize,
    pub platform: String,
    pub target_url: String,
    pub rel: String,
}

/// Text plus the anchors placed on it, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub text: String,
    pub anchors: Vec<Anchor>,
    /// Mentions consumed but left unlinked because their platform hit its cap
    pub capped: usize,
}

impl AnnotatedText {
    /// The text as alternating plain and linked runs.
    pub fn runs(&self) -> Vec<TextRun<'_>> {
        runs(&self.text, &self.anchors)
    }
}

/// A piece of text as a renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextRun<'a> {
    Plain {
        text: &'a str,
    },
    Link {
        text: &'a str,
        href: &'a str,
        rel: &'a str,
    },
}

/// Split text around anchors. Anchors must be ordered and non-overlapping.
pub fn runs<'a>(text: &'a str, anchors: impl IntoIterator<Item = &'a Anchor>) -> Vec<TextRun<'a>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    for anchor in anchors {
        if anchor.start > cursor {
            out.push(TextRun::Plain {
                text: &text[cursor..anchor.start],
            });
        }
        out.push(TextRun::Link {
            text: &text[anchor.start..anchor.end],
            href: &anchor.target_url,
            rel: &anchor.rel,
        });
        cursor = anchor.end;
    }
    if cursor < text.len() {
        out.push(TextRun::Plain {
            text: &text[cursor..],
        });
    }
    out
}

/// Place anchors on `text`, drawing on and updating the document's counter.
pub fn annotate(
    text: &str,
    table: &LinkTable,
    counter: &mut LinkOccurrenceCounter,
) -> AnnotatedText {
    let mut anchors = Vec::new();
    let mut capped = 0;

    if let Some(pattern) = &table.pattern {
        for captures in pattern.captures_iter(text) {
            let Some((target, span)) = table
                .targets
                .iter()
                .enumerate()
                .find_map(|(i, t)| captures.get(i + 1).map(|m| (t, m)))
            else {
                continue;
            };

            if counter.try_claim(target) {
                anchors.push(Anchor {
                    start: span.start(),
                    end: span.end(),
                    platform: target.platform.clone(),
                    target_url: target.target_url.clone(),
                    rel: SPONSORED_REL.to_string(),
                });
            } else {
                capped += 1;
            }
        }
    }

    AnnotatedText {
        text: text.to_string(),
        anchors,
        capped,
    }
}
