//! # Equation Lexer
//!
//! Tokenizes equation source into tokens. Whitespace, `//` line comments and
//! `/* */` block comments are skipped.
//!
//! ## Example
//!
//! ```rust
//! use geom_equation::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("x = 2*y;").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens[1].kind, TokenKind::Eq);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

// =============================================================================
// LEXER
// =============================================================================

/// Equation lexer.
///
/// Characters that start no token become [`TokenKind::Error`] tokens; the
/// parser reports them.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Token stream, always terminated by a single [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.skip_whitespace_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let end = self.cursor.offset();
        self.tokens.push(Token::new(TokenKind::Eof, end, String::new()));
        self.tokens
    }

    /// Skip whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.eat_while(char::is_whitespace);

            if self.cursor.eat_pair('/', '/') {
                self.cursor.eat_while(|c| c != '\n');
                continue;
            }

            if self.cursor.eat_pair('/', '*') {
                while !self.cursor.is_eof() && !self.cursor.eat_pair('*', '/') {
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.offset();
        let Some(c) = self.cursor.advance() else {
            return;
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.either('=', TokenKind::BangEq, TokenKind::Bang),
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '&' => self.either('&', TokenKind::AmpAmp, TokenKind::Error),
            '|' => self.either('|', TokenKind::PipePipe, TokenKind::Error),
            '0'..='9' => return self.scan_number(start),
            '.' if self.cursor.peek().is_some_and(|d| d.is_ascii_digit()) => {
                return self.scan_number(start)
            }
            c if c.is_alphabetic() || c == '_' => return self.scan_identifier(start),
            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Consume `next` if present and pick the two-character kind.
    fn either(&mut self, next: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.peek() == Some(next) {
            self.cursor.advance();
            double
        } else {
            single
        }
    }

    /// Scan a number literal. The first character is already consumed.
    fn scan_number(&mut self, start: usize) {
        let mut has_dot = self.source[start..].starts_with('.');
        let mut has_exponent = false;

        while let Some(c) = self.cursor.peek() {
            match c {
                '0'..='9' => {
                    self.cursor.advance();
                }
                '.' if !has_dot && !has_exponent => {
                    has_dot = true;
                    self.cursor.advance();
                }
                'e' | 'E' if !has_exponent => {
                    has_exponent = true;
                    self.cursor.advance();
                    if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan an identifier. The first character is already consumed.
    fn scan_identifier(&mut self, start: usize) {
        self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
        self.push(TokenKind::Identifier, start);
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.cursor.offset()];
        self.tokens.push(Token::new(kind, start, text));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_assignment() {
        let tokens = Lexer::new("x = y * 2;").tokenize();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0].text, "x");
        assert_eq!(tokens[1].kind, TokenKind::Eq);
        assert_eq!(tokens[4].kind, TokenKind::Number);
        assert_eq!(tokens[4].offset, 8);
        assert_eq!(tokens[6].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::new("1 2.5 .5 1e-3 3E+2").tokenize();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "2.5", ".5", "1e-3", "3E+2", ""]);
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("== != <= >= && || ! ^ %"),
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Caret,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_comments() {
        assert_eq!(
            kinds("// header\nx /* inline */ + 1"),
            vec![TokenKind::Identifier, TokenKind::Plus, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_tokenize_error_char() {
        let tokens = Lexer::new("x # y").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].offset, 2);
    }

    #[test]
    fn test_tokenize_single_ampersand_is_error() {
        assert_eq!(kinds("a & b")[1], TokenKind::Error);
    }
}
