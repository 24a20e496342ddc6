use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::operator::{is_two_char_capable, match_operator};
use crate::token::{Span, Token, TokenKind};

/// Fatal error: the character source could not be acquired.
#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Classifies a recoverable scanning event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Byte that starts no token; it was skipped.
    UnknownCharacter(u8),
    /// Token text exceeded the configured limit and was cut.
    Truncated { limit: usize },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCharacter(byte) if byte.is_ascii_graphic() => {
                write!(f, "skipped unknown character '{}'", char::from(*byte))
            }
            Self::UnknownCharacter(byte) => {
                write!(f, "skipped unknown byte 0x{byte:02X}")
            }
            Self::Truncated { limit } => {
                write!(f, "token truncated to {limit} bytes")
            }
        }
    }
}

/// Recoverable event recorded while scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    pub max_token_len: Option<usize>,
    pub collect_diagnostics: bool,
}

impl LexerOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_token_len: None,
            collect_diagnostics: false,
        }
    }

    /// Cap token text at `limit` bytes (at least one). Excess input is
    /// still consumed.
    #[must_use]
    pub fn max_token_len(mut self, limit: usize) -> Self {
        self.max_token_len = Some(limit.max(1));
        self
    }

    /// Record skipped characters and truncations instead of discarding them.
    #[must_use]
    pub const fn collect_diagnostics(mut self, enabled: bool) -> Self {
        self.collect_diagnostics = enabled;
        self
    }
}

/// Tokenize a source string.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input.as_bytes()).scan_all()
}

/// Tokenize a source string with explicit options, returning the tokens
/// and any diagnostics collected along the way.
#[must_use]
pub fn tokenize_with(input: &str, options: LexerOptions) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::with_options(input.as_bytes(), options);
    let tokens = lexer.scan_all();
    (tokens, lexer.close())
}

/// Open and tokenize a file.
///
/// # Errors
///
/// Returns `LexError::SourceUnavailable` if the file cannot be opened.
pub fn tokenize_file(path: impl AsRef<Path>) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::open(path)?;
    let tokens = lexer.scan_all();
    lexer.close();
    Ok(tokens)
}

/// Second byte of lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Peeked {
    Empty,
    Byte(u8),
    End,
}

/// Streaming scanner over a buffered byte source.
///
/// Reads the source strictly forward with one byte of lookahead. A read
/// failure part way through is treated as end of input.
pub struct Lexer<R: BufRead> {
    source: R,
    exhausted: bool,
    current: Option<u8>,
    peeked: Peeked,
    line: usize,
    col: usize,
    buffer: Vec<u8>,
    token_start: Span,
    truncated: bool,
    options: LexerOptions,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer<BufReader<File>> {
    /// Open a file as the character source.
    ///
    /// # Errors
    ///
    /// Returns `LexError::SourceUnavailable` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LexError> {
        Self::open_with(path, LexerOptions::new())
    }

    /// Open a file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns `LexError::SourceUnavailable` if the file cannot be opened.
    pub fn open_with(path: impl AsRef<Path>, options: LexerOptions) -> Result<Self, LexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened source");
        Ok(Self::with_options(BufReader::new(file), options))
    }
}

impl<R: BufRead> Lexer<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, LexerOptions::new())
    }

    #[must_use]
    pub fn with_options(reader: R, options: LexerOptions) -> Self {
        let mut lexer = Self {
            source: reader,
            exhausted: false,
            current: None,
            peeked: Peeked::Empty,
            line: 1,
            col: 1,
            buffer: Vec::new(),
            token_start: Span { line: 1, column: 1 },
            truncated: false,
            options,
            diagnostics: Vec::new(),
        };
        lexer.current = lexer.read_byte();
        lexer
    }

    /// Scan the rest of the source. The returned sequence always ends
    /// with exactly one `Eof` token.
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let Some(ch) = self.current else {
                break;
            };
            self.token_start = self.span();

            let token = if ch.is_ascii_alphabetic() {
                Some(self.read_identifier())
            } else if ch.is_ascii_digit() {
                Some(self.read_number())
            } else if ch == b'"' {
                Some(self.read_string())
            } else {
                self.read_operator()
            };

            if let Some(token) = token {
                trace!(
                    kind = %token.kind,
                    line = token.span.line,
                    column = token.span.column,
                    text = %token.text,
                    "token"
                );
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, String::new(), self.span()));
        debug!(tokens = tokens.len(), "scan complete");
        tokens
    }

    /// Diagnostics recorded so far. Empty unless collection is enabled.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Release the source, handing back the collected diagnostics.
    pub fn close(self) -> Vec<Diagnostic> {
        debug!(line = self.line, column = self.col, "closing source");
        self.diagnostics
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        match std::mem::replace(&mut self.peeked, Peeked::Empty) {
            Peeked::Byte(byte) => return Some(byte),
            Peeked::End => return None,
            Peeked::Empty => {}
        }
        if self.exhausted {
            return None;
        }
        loop {
            match self.source.fill_buf() {
                Ok(buf) => {
                    let byte = buf.first().copied();
                    if byte.is_some() {
                        self.source.consume(1);
                    } else {
                        self.exhausted = true;
                    }
                    return byte;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!(
                        error = %e,
                        line = self.line,
                        column = self.col,
                        "read failed, treating as end of input"
                    );
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }

    /// The byte after the lookahead, without consuming anything.
    fn peek(&mut self) -> Option<u8> {
        if self.peeked == Peeked::Empty {
            self.peeked = self.read_byte().map_or(Peeked::End, Peeked::Byte);
        }
        match self.peeked {
            Peeked::Byte(byte) => Some(byte),
            Peeked::Empty | Peeked::End => None,
        }
    }

    fn consume(&mut self) {
        match self.current {
            Some(b'\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => return,
        }
        self.current = self.read_byte();
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.consume();
        }
    }

    /// Append the lookahead to the token buffer, subject to the length
    /// cap, and consume it.
    fn take(&mut self) {
        let Some(byte) = self.current else {
            return;
        };
        match self.options.max_token_len {
            Some(limit) if self.buffer.len() >= limit => {
                if !self.truncated {
                    self.truncated = true;
                    warn!(
                        limit,
                        line = self.token_start.line,
                        column = self.token_start.column,
                        "token truncated"
                    );
                    self.record(DiagnosticKind::Truncated { limit }, self.token_start);
                }
            }
            _ => self.buffer.push(byte),
        }
        self.consume();
    }

    /// Append the lookahead ignoring the length cap.
    fn take_whole(&mut self) {
        if let Some(byte) = self.current {
            self.buffer.push(byte);
            self.consume();
        }
    }

    fn record(&mut self, kind: DiagnosticKind, span: Span) {
        if self.options.collect_diagnostics {
            self.diagnostics.push(Diagnostic { kind, span });
        }
    }

    fn finish(&mut self, kind: TokenKind) -> Token {
        let text = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        self.truncated = false;
        Token::new(kind, text, self.token_start)
    }

    fn read_identifier(&mut self) -> Token {
        while matches!(self.current, Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.take();
        }
        // A cut identifier is never a keyword, even if its prefix is.
        let truncated = self.truncated;
        let mut token = self.finish(TokenKind::Identifier);
        let keyword = if truncated {
            None
        } else {
            TokenKind::keyword(&token.text)
        };
        if let Some(keyword) = keyword {
            token.kind = keyword;
        }
        token
    }

    fn read_number(&mut self) -> Token {
        while matches!(self.current, Some(c) if c.is_ascii_digit()) {
            self.take();
        }
        self.finish(TokenKind::Number)
    }

    fn read_string(&mut self) -> Token {
        self.take(); // opening quote
        while let Some(c) = self.current {
            if c == b'"' {
                break;
            }
            self.take();
        }
        if self.current == Some(b'"') {
            self.take();
        }
        self.finish(TokenKind::String)
    }

    fn read_operator(&mut self) -> Option<Token> {
        let first = self.current?;
        let next = if is_two_char_capable(first) {
            self.peek()
        } else {
            None
        };

        let Some((kind, len)) = match_operator(first, next) else {
            debug!(
                byte = first,
                line = self.token_start.line,
                column = self.token_start.column,
                "skipping unknown character"
            );
            self.record(DiagnosticKind::UnknownCharacter(first), self.token_start);
            self.consume();
            self.buffer.clear();
            return None;
        };

        for _ in 0..len {
            self.take_whole();
        }
        Some(self.finish(kind))
    }
}
