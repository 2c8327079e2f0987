//! Error types for phraserank
//!
//! Only structural problems are errors. Empty documents, empty graphs and
//! non-converging rank computations degrade to empty or partial results.

use thiserror::Error;

/// Main error type for phraserank operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextRankError {
    /// A configuration parameter is out of range
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The annotated document violates an ordering invariant
    #[error("malformed input: {message}")]
    MalformedInput { message: String },
}

impl TextRankError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        TextRankError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed_input(message: impl Into<String>) -> Self {
        TextRankError::MalformedInput {
            message: message.into(),
        }
    }

    /// Returns `true` for configuration errors
    pub fn is_config_error(&self) -> bool {
        matches!(self, TextRankError::InvalidConfig { .. })
    }
}

/// Result type alias for phraserank operations
pub type Result<T> = std::result::Result<T, TextRankError>;
