//! # Modifier Errors
//!
//! Error types for records, property bags and stage execution.

use geom_buffer::EquationError;
use thiserror::Error;

/// Errors reading or writing binary records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Encoding or decoding a value failed.
    #[error("record codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// A header carried another tag than expected.
    #[error("expected record '{expected}', found '{found}'")]
    TagMismatch {
        /// Tag the reader asked for.
        expected: String,
        /// Tag stored in the stream.
        found: String,
    },

    /// A header carried a version newer than the reader supports.
    #[error("record '{tag}' has version {version}, newest supported is {supported}")]
    VersionTooNew {
        /// Record tag.
        tag: String,
        /// Stored version.
        version: u32,
        /// Newest version this build reads.
        supported: u32,
    },

    /// A skip or block length runs past the end of the data.
    #[error("record truncated: need {needed} bytes, {available} left")]
    Truncated {
        /// Bytes the length prefix asked for.
        needed: u64,
        /// Bytes remaining.
        available: usize,
    },
}

impl RecordError {
    /// Creates a tag mismatch error.
    pub fn tag_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TagMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Errors accessing a property bag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// No property with this id.
    #[error("unknown property '{0}'")]
    Missing(String),

    /// The property holds another type.
    #[error("property '{id}' is {found}, not {expected}")]
    TypeMismatch {
        /// Property id.
        id: String,
        /// Requested type.
        expected: &'static str,
        /// Stored type.
        found: &'static str,
    },
}

/// Errors from executing a stage.
///
/// Every variant names the class of the failing stage. A stage that
/// returns an error has left the buffer unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModifierError {
    /// An equation did not compile.
    #[error("{stage}: {source}")]
    Equation {
        /// Stage class name.
        stage: String,
        /// Evaluator failure.
        #[source]
        source: EquationError,
    },

    /// A property was missing or had the wrong type.
    #[error("{stage}: {source}")]
    Property {
        /// Stage class name.
        stage: String,
        /// Property failure.
        #[source]
        source: PropertyError,
    },

    /// The script host reported a failure.
    #[error("{stage}: script failed: {message}")]
    Script {
        /// Stage class name.
        stage: String,
        /// Host message.
        message: String,
    },
}

impl ModifierError {
    /// Wraps an equation error for `stage`.
    pub fn equation(stage: impl Into<String>, source: EquationError) -> Self {
        Self::Equation {
            stage: stage.into(),
            source,
        }
    }

    /// Wraps a property error for `stage`.
    pub fn property(stage: impl Into<String>, source: PropertyError) -> Self {
        Self::Property {
            stage: stage.into(),
            source,
        }
    }

    /// Class name of the failing stage.
    pub fn stage(&self) -> &str {
        match self {
            Self::Equation { stage, .. } | Self::Property { stage, .. } | Self::Script { stage, .. } => {
                stage
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
