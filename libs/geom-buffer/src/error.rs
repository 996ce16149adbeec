//! # Buffer Errors
//!
//! Error types for mesh buffer operations.
//!
//! Geometric operations never fail on benign input (empty buffers, zero
//! triangles); the only recoverable failure at this layer is an equation
//! that does not compile.

use thiserror::Error;

/// Errors from equation-driven transforms.
///
/// When one of these is returned the buffer is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquationError {
    /// An equation failed to compile.
    #[error("equation for '{target}' failed: {message}")]
    Compile {
        /// Which output the equation computes (`x`, `s`, `program`, ...).
        target: String,
        /// Evaluator message.
        message: String,
    },
}

impl EquationError {
    /// Creates a compile error.
    pub fn compile(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Compile {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Name of the failing equation's output.
    pub fn target(&self) -> &str {
        match self {
            Self::Compile { target, .. } => target,
        }
    }
}
