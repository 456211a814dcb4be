//! Error types for parameter binding and query execution.
//!
//! Every failure from binding through execution is a terminal outcome for
//! its request: no retries, no partial results, no logging from the core.
//! [`QueryError::client_error`] tells a boundary adapter whether to report
//! the failure as bad input or as a server-side problem.

use thiserror::Error;

use conflux_engine::EngineError;

use crate::convert::ConvertError;

/// The primary error type for query binding and execution.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A parameter value could not be converted to its declared type.
    #[error("invalid value for parameter '{parameter}': {source}")]
    InvalidParameter {
        /// The external name of the parameter.
        parameter: String,
        /// The conversion failure, carrying the offending text.
        #[source]
        source: ConvertError,
    },

    /// A requested sort field is not in the query type's whitelist.
    #[error("'{field}' is not a valid sort field for the {query_type} query")]
    InvalidSortField {
        /// The rejected field name.
        field: String,
        /// Label of the query type that rejected it.
        query_type: &'static str,
    },

    /// The sort parameters do not form valid criteria.
    #[error("invalid sort specification: {message}")]
    InvalidSorting {
        /// Description of the violation.
        message: String,
    },

    /// A list request exceeded the configured maximum result count.
    #[error("maxResults must be set and may not exceed the configured limit of {limit}")]
    MaxResultsExceeded {
        /// The configured limit.
        limit: u32,
    },

    /// The engine rejected or failed to execute the constructed query.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl QueryError {
    /// Whether the failure is attributable to the caller's input.
    ///
    /// Engine rejections count as client errors (the constructed query was
    /// not executable); engine-internal failures do not.
    pub fn client_error(&self) -> bool {
        match self {
            QueryError::InvalidParameter { .. }
            | QueryError::InvalidSortField { .. }
            | QueryError::InvalidSorting { .. }
            | QueryError::MaxResultsExceeded { .. } => true,
            QueryError::Engine(engine) => engine.is_rejection(),
        }
    }
}

/// Result type alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
