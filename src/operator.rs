//! Punctuation and operator classification.
//!
//! Every entry maps a leading byte to its one-character kind plus an
//! optional follow byte that upgrades it to a two-character kind. The
//! longest match wins.

use crate::token::TokenKind;

struct Operator {
    first: u8,
    single: TokenKind,
    double: Option<(u8, TokenKind)>,
}

const fn single(first: u8, kind: TokenKind) -> Operator {
    Operator {
        first,
        single: kind,
        double: None,
    }
}

const fn double(first: u8, kind: TokenKind, next: u8, upgraded: TokenKind) -> Operator {
    Operator {
        first,
        single: kind,
        double: Some((next, upgraded)),
    }
}

static OPERATORS: &[Operator] = &[
    double(b'=', TokenKind::Assign, b'=', TokenKind::Equal),
    double(b'<', TokenKind::Less, b'=', TokenKind::LessEqual),
    double(b'>', TokenKind::Greater, b'=', TokenKind::GreaterEqual),
    double(b'!', TokenKind::Bang, b'=', TokenKind::NotEqual),
    single(b'+', TokenKind::Plus),
    single(b'-', TokenKind::Minus),
    single(b'*', TokenKind::Star),
    single(b'/', TokenKind::Slash),
    single(b'%', TokenKind::Percent),
    single(b'(', TokenKind::LeftParen),
    single(b')', TokenKind::RightParen),
    single(b'{', TokenKind::LeftBrace),
    single(b'}', TokenKind::RightBrace),
    single(b'[', TokenKind::LeftBracket),
    single(b']', TokenKind::RightBracket),
    single(b',', TokenKind::Comma),
    single(b';', TokenKind::Semicolon),
    single(b'"', TokenKind::DoubleQuote),
    single(b'\'', TokenKind::Quote),
];

/// Whether `first` can be extended into a two-character operator.
#[must_use]
pub fn is_two_char_capable(first: u8) -> bool {
    OPERATORS
        .iter()
        .any(|op| op.first == first && op.double.is_some())
}

/// Match the longest operator starting with `first`.
///
/// `next` is the following byte, if any. Returns the kind and the
/// number of bytes it spans, or `None` when `first` has no mapping.
#[must_use]
pub fn match_operator(first: u8, next: Option<u8>) -> Option<(TokenKind, usize)> {
    let op = OPERATORS.iter().find(|op| op.first == first)?;
    match (op.double, next) {
        (Some((follow, upgraded)), Some(n)) if n == follow => Some((upgraded, 2)),
        _ => Some((op.single, 1)),
    }
}
