//! Property-based tests with proptest.
//!
//! Inputs are drawn from printable ASCII plus line breaks, which covers
//! every scanning mode and plenty of unmapped characters.

use lexscan::{Span, Token, TokenKind, tokenize};
use proptest::prelude::*;

fn source() -> impl Strategy<Value = String> {
    "[ -~\t\n]{0,200}"
}

/// Byte offset of a 1-based line/column position.
fn offset_of(input: &str, span: Span) -> usize {
    let line_start: usize = input
        .split_inclusive('\n')
        .take(span.line - 1)
        .map(str::len)
        .sum();
    line_start + span.column - 1
}

fn assert_located(input: &str, token: &Token) {
    let at = offset_of(input, token.span);
    assert_eq!(
        &input[at..at + token.text.len()],
        token.text,
        "token {token} not found at its span in {input:?}"
    );
}

proptest! {
    #[test]
    fn ends_with_single_eof(input in source()) {
        let tokens = tokenize(&input);
        let last = tokens.last().expect("never empty");
        prop_assert_eq!(last.kind, TokenKind::Eof);
        prop_assert!(last.text.is_empty());
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }

    #[test]
    fn tokens_are_located_substrings(input in source()) {
        let tokens = tokenize(&input);
        for token in &tokens[..tokens.len() - 1] {
            prop_assert!(!token.text.is_empty());
            prop_assert_ne!(token.kind, TokenKind::Unknown);
            assert_located(&input, token);
        }
    }

    #[test]
    fn tokens_are_in_source_order(input in source()) {
        let tokens = tokenize(&input);
        let offsets: Vec<usize> = tokens[..tokens.len() - 1]
            .iter()
            .map(|t| offset_of(&input, t.span))
            .collect();
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn no_whitespace_outside_strings(input in source()) {
        for token in tokenize(&input) {
            if token.kind != TokenKind::String {
                prop_assert!(!token.text.contains(|c: char| c.is_ascii_whitespace()));
            }
        }
    }

    #[test]
    fn identifiers_never_match_keywords(input in "[a-z][a-z0-9_]{0,8}") {
        let tokens = tokenize(&input);
        prop_assert_eq!(tokens.len(), 2);
        let expected = TokenKind::keyword(&input).unwrap_or(TokenKind::Identifier);
        prop_assert_eq!(tokens[0].kind, expected);
        prop_assert_eq!(&tokens[0].text, &input);
    }

    #[test]
    fn digits_then_letters_split(digits in "[0-9]{1,10}", word in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let input = format!("{digits}{word}");
        let tokens = tokenize(&input);
        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[0].kind, TokenKind::Number);
        prop_assert_eq!(&tokens[0].text, &digits);
        prop_assert_eq!(&tokens[1].text, &word);
    }
}
