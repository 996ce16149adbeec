//! # Equation AST
//!
//! Syntax tree produced by the parser. Names are still unresolved here;
//! [`crate::Program::compile`] binds them to slots.

// =============================================================================
// OPERATORS
// =============================================================================

/// Prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `+x`
    Plus,
    /// `!x`
    Not,
}

/// Infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Remainder with the sign of the dividend.
    Rem,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// Variable or named constant reference.
    Variable {
        name: String,
        offset: usize,
    },
    /// Prefix operation.
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Infix operation.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `cond ? then : otherwise`
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Function call.
    Call {
        name: String,
        args: Vec<Expr>,
        offset: usize,
    },
}

/// One statement of an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = value`
    Assign {
        name: String,
        offset: usize,
        value: Expr,
    },
    /// Bare expression; its value becomes the result if it is last.
    Expr(Expr),
}
