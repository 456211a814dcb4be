//! Page bounds for list execution.

use serde::Deserialize;

use crate::convert;
use crate::error::{QueryError, QueryResult};
use crate::params::RequestParams;

/// External name of the offset parameter.
pub const PARAM_FIRST_RESULT: &str = "firstResult";

/// External name of the page size parameter.
pub const PARAM_MAX_RESULTS: &str = "maxResults";

/// Requested page bounds for a list execution.
///
/// Both bounds are optional. A request with neither takes the plain
/// listing path; a request with either takes the page path, the missing
/// bound defaulting to the start of the result set or to the maximum
/// representable count. The path choice depends only on presence, never
/// on the values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSpec {
    first_result: Option<u32>,
    max_results: Option<u32>,
}

impl PageSpec {
    /// A page specification without bounds.
    pub const UNBOUNDED: PageSpec = PageSpec {
        first_result: None,
        max_results: None,
    };

    /// Creates a page specification from optional bounds.
    pub fn new(first_result: Option<u32>, max_results: Option<u32>) -> Self {
        PageSpec {
            first_result,
            max_results,
        }
    }

    /// Reads `firstResult` and `maxResults` from raw parameters.
    ///
    /// `firstResult` must be a non-negative integer, `maxResults` a
    /// positive one.
    pub fn from_params(params: &RequestParams) -> QueryResult<Self> {
        let first_result = match params.get(PARAM_FIRST_RESULT) {
            Some(values) => Some(convert::unsigned(values).map_err(|source| {
                QueryError::InvalidParameter {
                    parameter: PARAM_FIRST_RESULT.to_string(),
                    source,
                }
            })?),
            None => None,
        };
        let max_results = match params.get(PARAM_MAX_RESULTS) {
            Some(values) => Some(convert::positive(values).map_err(|source| {
                QueryError::InvalidParameter {
                    parameter: PARAM_MAX_RESULTS.to_string(),
                    source,
                }
            })?),
            None => None,
        };
        Ok(PageSpec {
            first_result,
            max_results,
        })
    }

    /// The requested offset, if any.
    pub fn first_result(&self) -> Option<u32> {
        self.first_result
    }

    /// The requested page size, if any.
    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    /// Whether either bound is present, selecting the page path.
    pub fn is_bounded(&self) -> bool {
        self.first_result.is_some() || self.max_results.is_some()
    }

    /// The offset to execute with: the requested one or the start.
    pub fn effective_first_result(&self) -> u32 {
        self.first_result.unwrap_or(0)
    }

    /// The page size to execute with: the requested one or the maximum
    /// representable count.
    pub fn effective_max_results(&self) -> u32 {
        self.max_results.unwrap_or(u32::MAX)
    }
}
