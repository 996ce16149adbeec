//! # Operator Parsing
//!
//! Parses binary and unary operators using precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | ?: (ternary) | Right |
//! | 2 | \|\| | Left |
//! | 3 | && | Left |
//! | 4 | == != | Left |
//! | 5 | < > <= >= | Left |
//! | 6 | + - | Left |
//! | 7 | * / % | Left |
//! | 8 | ^ | Right |
//! | 9 | ! - + (unary) | Right |
//!
//! Unary minus binds looser than `^`, so `-x^2` is `-(x^2)`.

use super::Parser;
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Ternary: `?:`
    Ternary = 1,
    /// Logical or: `||`
    Or = 2,
    /// Logical and: `&&`
    And = 3,
    /// Equality: `== !=`
    Equality = 4,
    /// Comparison: `< > <= >=`
    Comparison = 5,
    /// Addition/subtraction: `+ -`
    Term = 6,
    /// Multiplication/division: `* / %`
    Factor = 7,
    /// Power: `^`
    Power = 8,
    /// Unary: `! - +`
    Unary = 9,
}

impl Precedence {
    /// Get precedence for binary operator.
    ///
    /// ## Returns
    ///
    /// Precedence level if token is a binary operator, None otherwise
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Question => Some(Self::Ternary),
            TokenKind::PipePipe => Some(Self::Or),
            TokenKind::AmpAmp => Some(Self::And),
            TokenKind::EqEq | TokenKind::BangEq => Some(Self::Equality),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Some(Self::Comparison)
            }
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(Self::Factor),
            TokenKind::Caret => Some(Self::Power),
            _ => None,
        }
    }

    /// Get next higher precedence level.
    ///
    /// Used for left-associative operators.
    pub(super) fn next(self) -> Self {
        match self {
            Self::Ternary => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Power,
            Self::Power | Self::Unary => Self::Unary,
        }
    }
}

/// Map a binary operator token to its AST operator.
fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        TokenKind::Caret => BinaryOp::Pow,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::Ge,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl Parser {
    /// Parse expression with minimum precedence.
    ///
    /// ## Parameters
    ///
    /// - `min_prec`: Minimum precedence level to parse
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }

            if self.check(TokenKind::Question) {
                left = self.parse_ternary(left)?;
                continue;
            }

            left = self.parse_binary_op(left, prec)?;
        }

        Ok(left)
    }

    /// Parse binary operator.
    fn parse_binary_op(&mut self, left: Expr, prec: Precedence) -> Result<Expr, ParseError> {
        let token = self.advance();
        let op = binary_op(token.kind)
            .ok_or_else(|| ParseError::unexpected_token(&token.text, "operator", token.offset))?;

        // Right associativity for ^
        let next_prec = if op == BinaryOp::Pow { prec } else { prec.next() };
        let right = self.parse_precedence(next_prec)?;

        Ok(Expr::Binary {
            op,
            lhs: Box::new(left),
            rhs: Box::new(right),
        })
    }

    /// Parse ternary expression after its condition.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// ternary = expression "?" expression ":" expression
    /// ```
    fn parse_ternary(&mut self, condition: Expr) -> Result<Expr, ParseError> {
        self.expect(TokenKind::Question)?;
        let then = self.parse_expression()?;
        self.expect(TokenKind::Colon)?;
        let otherwise = self.parse_expression()?;

        Ok(Expr::Ternary {
            cond: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Parse unary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// unary = ("!" | "-" | "+") power | primary
    /// ```
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = self.parse_precedence(Precedence::Power)?;

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
