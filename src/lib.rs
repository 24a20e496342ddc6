//! Tokenizer for a small procedural language.
//!
//! Turns source text into an ordered sequence of typed tokens, each
//! tagged with the line and column of its first character. The scanner
//! is lenient: unrecognised characters are skipped and an unterminated
//! string runs to the end of input. Only opening the source can fail.
//!
//! # Quick start
//!
//! ```
//! use lexscan::{TokenKind, tokenize};
//!
//! let tokens = tokenize("let x = 42;");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Let,
//!         TokenKind::Identifier,
//!         TokenKind::Assign,
//!         TokenKind::Number,
//!         TokenKind::Semicolon,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```
//!
//! ## Collecting diagnostics
//!
//! ```
//! use lexscan::{LexerOptions, tokenize_with};
//!
//! let options = LexerOptions::new().collect_diagnostics(true);
//! let (tokens, diagnostics) = tokenize_with("a @ b", options);
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(diagnostics.len(), 1);
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod operator;
pub mod token;

pub use lexer::{
    Diagnostic, DiagnosticKind, LexError, Lexer, LexerOptions, tokenize, tokenize_file,
    tokenize_with,
};
pub use token::{Span, Token, TokenKind};
