use std::fmt;

/// Source location of the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `fn`
    Fn,
    /// `let`
    Let,
    /// `back`
    Return,
    If,
    Unless,
    Else,
    While,
    For,
    /// `in`, as in `for x in xs`.
    In,
    True,
    False,
    And,
    Or,

    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `"` on its own. The scanner always reads it as the start of a string.
    DoubleQuote,
    /// `'`
    Quote,

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    /// Letter followed by letters, digits or underscores.
    Identifier,
    /// Run of ASCII digits.
    Number,
    /// Double-quoted run, quotes included.
    String,

    /// End of the source. Always the last token, with empty text.
    Eof,
    /// Character with no mapping. Never emitted.
    Unknown,
}

/// Reserved words, matched exactly and case-sensitively.
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("fn", TokenKind::Fn),
    ("let", TokenKind::Let),
    ("back", TokenKind::Return),
    ("if", TokenKind::If),
    ("unless", TokenKind::Unless),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
];

impl TokenKind {
    /// Look up the keyword kind for an identifier's text.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|&(_, kind)| kind)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fn => "Fn",
            Self::Let => "Let",
            Self::Return => "Return",
            Self::If => "If",
            Self::Unless => "Unless",
            Self::Else => "Else",
            Self::While => "While",
            Self::For => "For",
            Self::In => "In",
            Self::True => "True",
            Self::False => "False",
            Self::And => "And",
            Self::Or => "Or",
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
            Self::LeftBrace => "LeftBrace",
            Self::RightBrace => "RightBrace",
            Self::LeftBracket => "LeftBracket",
            Self::RightBracket => "RightBracket",
            Self::Comma => "Comma",
            Self::Semicolon => "Semicolon",
            Self::DoubleQuote => "DoubleQuote",
            Self::Quote => "Quote",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Star => "Star",
            Self::Slash => "Slash",
            Self::Percent => "Percent",
            Self::Bang => "Bang",
            Self::Assign => "Assign",
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::Less => "Less",
            Self::LessEqual => "LessEqual",
            Self::Greater => "Greater",
            Self::GreaterEqual => "GreaterEqual",
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::String => "String",
            Self::Eof => "Eof",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, text: String, span: Span) -> Self {
        Self { kind, text, span }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Debug rendering: `line:column Token(Kind, "text")`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} Token({}, {:?})",
            self.span.line, self.span.column, self.kind, self.text
        )
    }
}
