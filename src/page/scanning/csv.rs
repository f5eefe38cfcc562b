//! Csv row splitting
//!
//! Comparison tables are pasted as comma separated rows, one per line. Each line is read as a
//! single csv record: fields may be double quoted to carry commas, a doubled quote inside a
//! quoted field is a literal quote, and an unterminated quote runs to the end of the line.

use ::csv::{ReaderBuilder, Trim};

pub fn split_row(line: &str) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(err)) => {
            tracing::debug!(error = %err, "unreadable csv row kept as one cell");
            vec![line.trim().to_string()]
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_row() {
        assert_eq!(split_row("Casino, Bonus ,Rating"), vec!["Casino", "Bonus", "Rating"]);
    }

    #[test]
    fn test_quoted_comma() {
        assert_eq!(
            split_row(r#"Bet365,"100%, up to £100",4.5"#),
            vec!["Bet365", "100%, up to £100", "4.5"]
        );
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(split_row(r#""The ""best"" one",x"#), vec![r#"The "best" one"#, "x"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(split_row(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_blank_line_has_no_cells() {
        assert!(split_row("").is_empty());
    }

    #[test]
    fn test_trailing_comma_gives_empty_cell() {
        assert_eq!(split_row("a,b,"), vec!["a", "b", ""]);
    }
}
