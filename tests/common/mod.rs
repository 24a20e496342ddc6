#![allow(dead_code)]

use lexscan::{Token, TokenKind, tokenize};

pub fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).iter().map(|t| t.kind).collect()
}

/// Kind and text of every token except the trailing `Eof`.
pub fn pairs(input: &str) -> Vec<(TokenKind, String)> {
    let tokens = tokenize(input);
    let (last, body) = tokens.split_last().expect("at least the eof token");
    assert!(last.is_eof(), "sequence must end with eof: {tokens:?}");
    body.iter().map(|t| (t.kind, t.text.clone())).collect()
}

pub fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
