//! # Tokens
//!
//! Token kinds produced by the equation lexer.

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal: `1`, `2.5`, `.5`, `1e-3`
    Number,
    /// Variable or function name
    Identifier,

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `?`
    Question,
    /// `:`
    Colon,

    // Operators
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
    /// `^`
    Caret,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `!`
    Bang,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,

    /// Character that starts no token
    Error,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Short description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Question => "'?'",
            Self::Colon => "':'",
            Self::Eq => "'='",
            Self::Eof => "end of equation",
            _ => "operator",
        }
    }
}

// =============================================================================
// TOKEN
// =============================================================================

/// A token with its source text and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Source text of the token.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, offset: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            text: text.into(),
        }
    }
}
