//! # Geometry Equation
//!
//! A small expression language for the equation-driven mesh modifiers.
//! Equations are compiled once against a fixed list of variable names and
//! then evaluated per vertex or per primitive.
//!
//! ## Language
//!
//! - Statements separated by `;`: `x = x * 2; y = sin(x)`
//! - Arithmetic `+ - * / % ^`, comparison `== != < <= > >=`, logic `&& || !`
//! - Ternary `cond ? a : b`; comparisons and logic yield `1` or `0`
//! - Constants `PI`, `TAU`, `E`; functions listed in [`functions`]
//! - Assigning to an undeclared name creates a local
//!
//! ## Example
//!
//! ```rust
//! use geom_equation::Program;
//!
//! let program = Program::compile("x = x + 1; y = x ^ 2", &["x", "y"]).unwrap();
//! let mut slots = [1.0, 0.0];
//! program.run(&mut slots);
//! assert_eq!(slots, [2.0, 4.0]);
//! ```

pub mod ast;
pub mod error;
pub mod functions;
pub mod lexer;
pub mod parser;
mod program;

pub use error::ParseError;
pub use program::Program;

/// Compile and evaluate a single expression with no variables.
///
/// ## Example
///
/// ```rust
/// assert_eq!(geom_equation::eval("2 + 3 * 4").unwrap(), 14.0);
/// ```
pub fn eval(source: &str) -> Result<f64, ParseError> {
    Ok(Program::compile(source, &[])?.run(&mut []))
}
