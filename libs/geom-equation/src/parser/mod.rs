//! # Equation Parser
//!
//! Recursive descent parser turning a token stream into statements.
//!
//! ## Grammar
//!
//! ```text
//! program    = statement (";" statement)* ";"?
//! statement  = IDENT "=" expression | expression
//! expression = ternary
//! primary    = NUMBER | IDENT | IDENT "(" args? ")" | "(" expression ")"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use geom_equation::lexer::Lexer;
//! use geom_equation::parser::Parser;
//!
//! let tokens = Lexer::new("x = 1; y = x * 2").tokenize();
//! let statements = Parser::new(tokens).parse().unwrap();
//! assert_eq!(statements.len(), 2);
//! ```

mod operators;

use crate::ast::{Expr, Statement};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

use operators::Precedence;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for equations.
///
/// Stops at the first error.
pub struct Parser {
    /// Token stream, terminated by `Eof`.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
}

impl Parser {
    /// Create a new parser from lexer output.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse all statements.
    ///
    /// ## Returns
    ///
    /// Non-empty statement list, or [`ParseError::Empty`] if the source has
    /// nothing but separators and comments.
    pub fn parse(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        loop {
            while self.check(TokenKind::Semicolon) {
                self.advance();
            }
            if self.is_at_end() {
                break;
            }

            statements.push(self.parse_statement()?);

            if !self.is_at_end() {
                self.expect(TokenKind::Semicolon)?;
            }
        }

        if statements.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(statements)
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current).or_else(|| self.tokens.last())
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Get kind of the token after the current one.
    fn peek_next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.current + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if at end of input.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Advance to next token, returning the consumed one.
    fn advance(&mut self) -> Token {
        let token = self
            .peek()
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, 0, String::new()));
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consume a token of the given kind or fail.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(kind.describe()))
        }
    }

    /// Build an error for the current token.
    fn error_here(&self, expected: &str) -> ParseError {
        match self.peek() {
            None => ParseError::unexpected_end(expected),
            Some(token) => match token.kind {
                TokenKind::Eof => ParseError::unexpected_end(expected),
                TokenKind::Error => ParseError::UnexpectedChar {
                    found: token.text.chars().next().unwrap_or('?'),
                    offset: token.offset,
                },
                _ => ParseError::unexpected_token(&token.text, expected, token.offset),
            },
        }
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// Parse a single statement.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check(TokenKind::Identifier) && self.peek_next_kind() == TokenKind::Eq {
            let name = self.advance();
            self.advance();
            let value = self.parse_expression()?;
            return Ok(Statement::Assign {
                name: name.text,
                offset: name.offset,
                value,
            });
        }
        Ok(Statement::Expr(self.parse_expression()?))
    }

    /// Parse an expression.
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_precedence(Precedence::Ternary)
    }

    // =========================================================================
    // PRIMARIES
    // =========================================================================

    /// Parse a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.advance();
                token
                    .text
                    .parse::<f64>()
                    .map(Expr::Number)
                    .map_err(|_| ParseError::InvalidNumber {
                        text: token.text.clone(),
                        offset: token.offset,
                    })
            }
            TokenKind::Identifier => {
                let token = self.advance();
                if self.check(TokenKind::LParen) {
                    self.advance();
                    let args = self.parse_arguments()?;
                    return Ok(Expr::Call {
                        name: token.text,
                        args,
                        offset: token.offset,
                    });
                }
                Ok(Expr::Variable {
                    name: token.text,
                    offset: token.offset,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.error_here("expression")),
        }
    }

    /// Parse call arguments after the opening parenthesis.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.check(TokenKind::Comma) {
                self.advance();
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
