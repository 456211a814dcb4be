//! Error types for engine query execution.
//!
//! Engine handles accumulate filters and ordering without failing; problems
//! with the constructed query are reported once, by the terminal operation
//! that executes it.

use thiserror::Error;

/// Errors raised by a query engine when executing a constructed query.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// The engine refused the constructed query, e.g. a malformed filter
    /// combination or a direction call without a preceding ordering call.
    #[error("query rejected by the engine: {message}")]
    QueryRejected {
        /// Engine-supplied description of what was wrong with the query.
        message: String,
    },

    /// The engine failed for reasons unrelated to the query itself.
    #[error("engine failure: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::QueryRejected`] with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        EngineError::QueryRejected {
            message: message.into(),
        }
    }

    /// Creates a [`EngineError::Internal`] with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        EngineError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error describes a problem with the query as constructed,
    /// as opposed to an engine-side failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, EngineError::QueryRejected { .. })
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
