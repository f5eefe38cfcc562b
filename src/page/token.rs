//! Token definitions for content briefs
//!
//!     Briefs have no formal grammar, only a handful of consequential marks: heading markers
//!     such as `(h2)`, the bullet glyph, ordinals, dashes and label colons. The logos lexer
//!     splits one physical line into these marks plus runs of plain text, and line
//!     classification works over the resulting tokens. Text is never rebuilt from tokens, the
//!     scanner keeps the source line, so tokens carry no payload beyond what classification
//!     needs.
use logos::Logos;

/// Core tokens produced for a single source line.
#[derive(Logos, Debug, PartialEq, Eq, Clone, serde::Serialize, serde::Deserialize)]
pub enum Token {
    /// `(hN)`. Carries the raw level; 0 when the digits do not fit.
    #[regex(r"\(h[0-9]+\)", heading_level)]
    HeadingMarker(u32),

    #[token("•")]
    Bullet,

    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    #[token(".")]
    Period,

    #[token("-")]
    #[token("–")]
    #[token("—")]
    Dash,

    #[token(":")]
    Colon,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[ \t]+")]
    Whitespace,

    // Catch-all for everything that is not one of the marks above
    #[regex(r"[^ \t\r\n\.:()•0-9\-–—]+", |lex| lex.slice().to_string())]
    Text(String),
}

fn heading_level(lex: &mut logos::Lexer<Token>) -> u32 {
    let slice = lex.slice();
    slice[2..slice.len() - 1].parse().unwrap_or(0)
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }

    /// Tokens allowed inside a label such as `Meta Title (60 chars):`
    pub fn is_label_part(&self) -> bool {
        matches!(
            self,
            Token::Text(_)
                | Token::Number(_)
                | Token::Whitespace
                | Token::Dash
                | Token::OpenParen
                | Token::CloseParen
        )
    }
}

/// Tokenize one line with byte spans relative to the line.
///
/// Characters logos cannot place (stray carriage returns) are dropped; the scanner keeps the
/// source line, so nothing downstream loses text because of it.
pub fn tokenize(line: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<Token> {
        tokenize(line).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_heading_marker() {
        assert_eq!(
            kinds("Intro (h2)"),
            vec![
                Token::Text("Intro".to_string()),
                Token::Whitespace,
                Token::HeadingMarker(2),
            ]
        );
    }

    #[test]
    fn test_unparseable_marker_level_is_zero() {
        assert_eq!(kinds("(h99999999999)"), vec![Token::HeadingMarker(0)]);
    }

    #[test]
    fn test_parenthesised_text_is_not_a_marker() {
        assert_eq!(
            kinds("(hx)"),
            vec![
                Token::OpenParen,
                Token::Text("hx".to_string()),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_review_heading_tokens() {
        assert_eq!(
            kinds("1. Bet365 – Fast"),
            vec![
                Token::Number("1".to_string()),
                Token::Period,
                Token::Whitespace,
                Token::Text("Bet".to_string()),
                Token::Number("365".to_string()),
                Token::Whitespace,
                Token::Dash,
                Token::Whitespace,
                Token::Text("Fast".to_string()),
            ]
        );
    }

    #[test]
    fn test_bullet_and_label() {
        assert_eq!(kinds("•"), vec![Token::Bullet]);
        assert_eq!(
            kinds("Pros:"),
            vec![Token::Text("Pros".to_string()), Token::Colon]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }
}
