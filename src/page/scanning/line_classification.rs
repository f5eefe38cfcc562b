//! Line Classification
//!
//! Classification logic for determining a line's shape from its tokens. Context the scanner
//! tracks across lines (csv blocks) is handled in [scanner](super::scanner); everything here
//! looks at one line only.

use crate::page::token::Token;

use super::line::{Demotion, LineType};

/// Longest label accepted as `Label:`, in words.
const MAX_LABEL_WORDS: usize = 6;

/// Determine the shape of a single line from its tokens.
///
/// Classification follows this order (important for correctness):
/// 1. Blank lines
/// 2. Heading lines (trailing `(hN)` marker)
/// 3. Bullet lines (leading `•`)
/// 4. Label lines (`Label:` or `Label: value`)
/// 5. Default to plain text
///
/// Headings come first so "Pros and Cons: A Guide (h2)" is a heading, not a label. A heading
/// marker whose level is unusable demotes the line to plain text and reports why.
pub fn classify_line(tokens: &[Token]) -> (LineType, Option<Demotion>) {
    if is_blank_line(tokens) {
        return (LineType::Blank, None);
    }

    match heading_marker(tokens) {
        Some(HeadingShape::Valid(level)) => return (LineType::Heading(level), None),
        Some(HeadingShape::Demoted(reason)) => return (LineType::PlainText, Some(reason)),
        None => {}
    }

    if has_bullet_marker(tokens) {
        return (LineType::BulletItem, None);
    }

    if is_label_line(tokens) {
        return (LineType::MetadataLabel, None);
    }

    (LineType::PlainText, None)
}

enum HeadingShape {
    Valid(u8),
    Demoted(Demotion),
}

/// Check if line is blank (only whitespace)
fn is_blank_line(tokens: &[Token]) -> bool {
    tokens.iter().all(Token::is_whitespace)
}

/// Inspect the last non-whitespace token for a heading marker.
fn heading_marker(tokens: &[Token]) -> Option<HeadingShape> {
    let mut content = tokens.iter().filter(|t| !t.is_whitespace());
    let last = content.next_back()?;
    let Token::HeadingMarker(level) = last else {
        return None;
    };

    if content.next().is_none() {
        return Some(HeadingShape::Demoted(Demotion::EmptyHeading));
    }

    match *level {
        1..=6 => Some(HeadingShape::Valid(*level as u8)),
        other => Some(HeadingShape::Demoted(Demotion::MalformedLevel(other))),
    }
}

/// Check if line starts with the bullet glyph (after optional whitespace)
pub fn has_bullet_marker(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .find(|t| !t.is_whitespace())
        .is_some_and(|t| matches!(t, Token::Bullet))
}

/// Check if line is `Label:` or `Label: value`.
///
/// The label must start with a capitalised word, be at most a few words long, and be made only
/// of text, numbers, dashes and parenthesised hints. The colon must end the line or be followed
/// by whitespace, which keeps times ("10:30") and URLs out.
pub fn is_label_line(tokens: &[Token]) -> bool {
    let start = tokens
        .iter()
        .position(|t| !t.is_whitespace())
        .unwrap_or(tokens.len());

    match tokens.get(start) {
        Some(Token::Text(word)) if word.chars().next().is_some_and(char::is_uppercase) => {}
        _ => return false,
    }

    let Some(colon) = tokens[start..]
        .iter()
        .position(|t| matches!(t, Token::Colon))
        .map(|i| i + start)
    else {
        return false;
    };

    let label = &tokens[start..colon];
    if !label.iter().all(Token::is_label_part) {
        return false;
    }

    let words = label
        .iter()
        .filter(|t| matches!(t, Token::Text(_) | Token::Number(_)))
        .count();
    if words > MAX_LABEL_WORDS {
        return false;
    }

    match tokens.get(colon + 1) {
        None => true,
        Some(next) => next.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::token::tokenize;
    use rstest::rstest;

    fn classify(line: &str) -> (LineType, Option<Demotion>) {
        let tokens: Vec<Token> = tokenize(line).into_iter().map(|(t, _)| t).collect();
        classify_line(&tokens)
    }

    #[rstest]
    #[case("", LineType::Blank)]
    #[case("   \t ", LineType::Blank)]
    #[case("Welcome (h1)", LineType::Heading(1))]
    #[case("1. Casino Royale - Fast Payouts (h3)", LineType::Heading(3))]
    #[case("Pros and Cons: A Guide (h2)", LineType::Heading(2))]
    #[case("• Fast withdrawals", LineType::BulletItem)]
    #[case("   • Indented bullet", LineType::BulletItem)]
    #[case("Pros:", LineType::MetadataLabel)]
    #[case("Mobile Compatibility: Excellent", LineType::MetadataLabel)]
    #[case("Meta Title (60 chars):", LineType::MetadataLabel)]
    #[case("Opening hours are 10:30 daily", LineType::PlainText)]
    #[case("See https://example.com for more", LineType::PlainText)]
    #[case("lowercase: not a label", LineType::PlainText)]
    #[case("This sentence is far too long to be a label: really", LineType::PlainText)]
    #[case("Plain paragraph text.", LineType::PlainText)]
    fn test_classify(#[case] line: &str, #[case] expected: LineType) {
        assert_eq!(classify(line).0, expected);
    }

    #[test]
    fn test_out_of_range_marker_is_demoted() {
        assert_eq!(
            classify("Too deep (h7)"),
            (LineType::PlainText, Some(Demotion::MalformedLevel(7)))
        );
        assert_eq!(
            classify("Zero (h0)"),
            (LineType::PlainText, Some(Demotion::MalformedLevel(0)))
        );
    }

    #[test]
    fn test_bare_marker_is_demoted() {
        assert_eq!(
            classify("(h2)"),
            (LineType::PlainText, Some(Demotion::EmptyHeading))
        );
    }

    #[test]
    fn test_marker_mid_line_is_not_a_heading() {
        assert_eq!(classify("The (h2) marker must end the line").0, LineType::PlainText);
    }
}
