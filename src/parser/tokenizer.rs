//! Line-level tokenizing primitives.
//!
//! A DTRACK line is whitespace tokens followed by bracket-delimited
//! sections. Sections are separated by `"]["` or `"] ["`; the wire format
//! uses both spellings and they must be accepted interchangeably.

use crate::core::{excerpt, ParseError};

/// Split the bracketed remainder of a line into its sections.
///
/// The enclosing `[` / `]` are trimmed first, then the interior is split
/// on both section separators. An interior empty section (from `[]` on
/// the wire) comes back as an empty string; a trailing empty section is
/// swallowed by the bracket trim, so consumers index sections lazily
/// instead of demanding an exact total.
pub fn sections(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim().trim_matches(['[', ']']);
    trimmed
        .split("][")
        .flat_map(|part| part.split("] ["))
        .collect()
}

/// Parse one token as `f32`.
pub fn parse_f32(token: &str, line: &str) -> Result<f32, ParseError> {
    token.parse().map_err(|_| malformed(token, line))
}

/// Parse one token as `f64`.
pub fn parse_f64(token: &str, line: &str) -> Result<f64, ParseError> {
    token.parse().map_err(|_| malformed(token, line))
}

/// Parse one token as `i32`.
pub fn parse_i32(token: &str, line: &str) -> Result<i32, ParseError> {
    token.parse().map_err(|_| malformed(token, line))
}

/// Parse one token as `u32`.
pub fn parse_u32(token: &str, line: &str) -> Result<u32, ParseError> {
    token.parse().map_err(|_| malformed(token, line))
}

/// Parse one packed-button token as a 32-bit word.
///
/// The controller prints the packed word as a signed or unsigned decimal
/// depending on firmware; accept both and keep the bit pattern.
pub fn parse_button_word(token: &str, line: &str) -> Result<u32, ParseError> {
    token
        .parse::<u32>()
        .or_else(|_| token.parse::<i32>().map(|v| v as u32))
        .map_err(|_| malformed(token, line))
}

/// Fetch token `idx` from a token slice, or fail with the line context.
pub fn token<'a>(tokens: &[&'a str], idx: usize, line: &str) -> Result<&'a str, ParseError> {
    tokens.get(idx).copied().ok_or(ParseError::MissingTokens {
        expected: idx + 1,
        excerpt: excerpt(line),
    })
}

fn malformed(token: &str, line: &str) -> ParseError {
    ParseError::MalformedNumber {
        token: token.to_string(),
        excerpt: excerpt(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_split_on_both_separator_spellings() {
        assert_eq!(
            sections("[0 0.98][100.0 200.0 300.0][1 0 0 0 1 0 0 0 1]"),
            vec!["0 0.98", "100.0 200.0 300.0", "1 0 0 0 1 0 0 0 1"]
        );
        assert_eq!(sections("[a] [b][c] [d]"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn interior_empty_section_survives_trailing_one_collapses() {
        assert_eq!(sections("[a][][b]"), vec!["a", "", "b"]);
        assert_eq!(sections("[1 2 3][]"), vec!["1 2 3"]);
    }

    #[test]
    fn numeric_parsing_is_period_decimal_only() {
        assert!(parse_f32("3.25", "x").is_ok());
        assert!(matches!(
            parse_f32("3,25", "x"),
            Err(ParseError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn button_word_accepts_signed_spelling() {
        assert_eq!(parse_button_word("-1", "x").unwrap(), u32::MAX);
        assert_eq!(parse_button_word("641", "x").unwrap(), 641);
    }

    #[test]
    fn missing_token_reports_expected_count() {
        let tokens = ["6d", "1"];
        let err = token(&tokens, 2, "6d 1").unwrap_err();
        assert!(matches!(err, ParseError::MissingTokens { expected: 3, .. }));
    }
}
