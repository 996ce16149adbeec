//! # Parse Errors
//!
//! Error types for the equation compiler.
//!
//! ## Example
//!
//! ```rust
//! use geom_equation::ParseError;
//!
//! let error = ParseError::unexpected_token(")", "expression", 4);
//! assert!(error.to_string().contains("unexpected token ')'"));
//! ```

use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// Errors produced while compiling an equation.
///
/// Every variant that refers to a location carries the byte offset into the
/// source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Found a token that does not fit the grammar.
    #[error("unexpected token '{found}' at byte {offset}, expected {expected}")]
    UnexpectedToken {
        /// Token text that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
        /// Byte offset of the token.
        offset: usize,
    },

    /// Source ended in the middle of a statement.
    #[error("unexpected end of equation, expected {expected}")]
    UnexpectedEnd {
        /// Description of what was expected.
        expected: String,
    },

    /// Character that starts no token.
    #[error("unexpected character '{found}' at byte {offset}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// Byte offset of the character.
        offset: usize,
    },

    /// Malformed number literal.
    #[error("invalid number '{text}' at byte {offset}")]
    InvalidNumber {
        /// The literal text.
        text: String,
        /// Byte offset of the literal.
        offset: usize,
    },

    /// Variable read before it was declared or assigned.
    #[error("unknown variable '{name}' at byte {offset}")]
    UnknownVariable {
        /// Variable name.
        name: String,
        /// Byte offset of the reference.
        offset: usize,
    },

    /// Call to a function that does not exist.
    #[error("unknown function '{name}' at byte {offset}")]
    UnknownFunction {
        /// Function name.
        name: String,
        /// Byte offset of the call.
        offset: usize,
    },

    /// Function called with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s), got {found}")]
    WrongArgCount {
        /// Function name.
        name: String,
        /// Human readable expected count, e.g. `2` or `at least 2`.
        expected: String,
        /// Number of arguments given.
        found: usize,
    },

    /// Source contains no statement.
    #[error("empty equation")]
    Empty,
}

impl ParseError {
    /// Create unexpected token error.
    ///
    /// ## Parameters
    ///
    /// - `found`: Token that was found
    /// - `expected`: Description of expected token
    /// - `offset`: Byte offset of the token
    pub fn unexpected_token(found: &str, expected: &str, offset: usize) -> Self {
        Self::UnexpectedToken {
            found: found.to_string(),
            expected: expected.to_string(),
            offset,
        }
    }

    /// Create unexpected end error.
    pub fn unexpected_end(expected: &str) -> Self {
        Self::UnexpectedEnd {
            expected: expected.to_string(),
        }
    }

    /// Byte offset of the error, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedChar { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::UnknownVariable { offset, .. }
            | Self::UnknownFunction { offset, .. } => Some(*offset),
            Self::UnexpectedEnd { .. } | Self::WrongArgCount { .. } | Self::Empty => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_display() {
        let error = ParseError::unexpected_token(")", "expression", 3);
        let msg = error.to_string();
        assert!(msg.contains("unexpected token ')'"));
        assert!(msg.contains("expression"));
        assert_eq!(error.offset(), Some(3));
    }

    #[test]
    fn test_unexpected_end_has_no_offset() {
        let error = ParseError::unexpected_end("')'");
        assert!(error.to_string().contains("unexpected end"));
        assert_eq!(error.offset(), None);
    }
}
