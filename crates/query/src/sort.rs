//! Sort criteria and whitelist resolution.
//!
//! Criteria arrive either as matched `sortBy`/`sortOrder` parameter pairs
//! or inside a JSON query document. Resolution validates every requested
//! field against the query type's whitelist before the engine is touched;
//! the executor only accepts criteria that passed through here.

use serde::Deserialize;

use conflux_engine::ProcessEngine;

use crate::convert::ConvertError;
use crate::definition::QueryDefinition;
use crate::error::{QueryError, QueryResult};
use crate::params::RequestParams;

/// External name of the sort field parameter.
pub const PARAM_SORT_BY: &str = "sortBy";

/// External name of the sort direction parameter.
pub const PARAM_SORT_ORDER: &str = "sortOrder";

/// Direction of one sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    /// Smallest value first.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest value first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Parses the external direction token (`asc` or `desc`, exactly).
    pub fn from_param(raw: &str) -> Result<Self, ConvertError> {
        match raw {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(ConvertError::InvalidSortOrder(other.to_string())),
        }
    }

    /// The external token for this direction.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// One requested ordering: a field name and a direction.
///
/// A request carries zero or more criteria; the first is the primary
/// ordering and later ones break ties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCriterion {
    /// The requested field name, validated against the whitelist during
    /// resolution.
    pub sort_by: String,

    /// The requested direction.
    pub sort_order: SortOrder,
}

impl SortCriterion {
    /// Creates a criterion.
    pub fn new(sort_by: impl Into<String>, sort_order: SortOrder) -> Self {
        SortCriterion {
            sort_by: sort_by.into(),
            sort_order,
        }
    }

    /// Creates an ascending criterion.
    pub fn ascending(sort_by: impl Into<String>) -> Self {
        SortCriterion::new(sort_by, SortOrder::Ascending)
    }

    /// Creates a descending criterion.
    pub fn descending(sort_by: impl Into<String>) -> Self {
        SortCriterion::new(sort_by, SortOrder::Descending)
    }
}

/// Extracts sort criteria from raw `sortBy`/`sortOrder` parameters.
///
/// The two parameters must appear as matched pairs: both absent means no
/// ordering, one without the other or mismatched occurrence counts is a
/// validation error. Pairs combine by position, so
/// `?sortBy=createTime&sortOrder=desc&sortBy=incidentId&sortOrder=asc`
/// yields two criteria in that order.
pub fn sorting_from_params(params: &RequestParams) -> QueryResult<Vec<SortCriterion>> {
    match (params.get(PARAM_SORT_BY), params.get(PARAM_SORT_ORDER)) {
        (None, None) => Ok(Vec::new()),
        (Some(_), None) | (None, Some(_)) => Err(QueryError::InvalidSorting {
            message: format!("{PARAM_SORT_BY} and {PARAM_SORT_ORDER} must be specified together"),
        }),
        (Some(fields), Some(orders)) => {
            if fields.len() != orders.len() {
                return Err(QueryError::InvalidSorting {
                    message: format!(
                        "{} {PARAM_SORT_BY} values do not match {} {PARAM_SORT_ORDER} values",
                        fields.len(),
                        orders.len()
                    ),
                });
            }
            fields
                .iter()
                .zip(orders)
                .map(|(field, order)| {
                    let sort_order = SortOrder::from_param(order).map_err(|source| {
                        QueryError::InvalidParameter {
                            parameter: PARAM_SORT_ORDER.to_string(),
                            source,
                        }
                    })?;
                    Ok(SortCriterion::new(field.clone(), sort_order))
                })
                .collect()
        }
    }
}

/// Criteria that passed whitelist validation for one query type.
///
/// Only [`resolve_sorting`] produces this, which is what keeps partially
/// validated orderings out of the executor.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSorting<'a> {
    criteria: &'a [SortCriterion],
}

impl<'a> ResolvedSorting<'a> {
    /// Iterates the criteria in request order.
    pub fn iter(&self) -> impl Iterator<Item = &'a SortCriterion> {
        self.criteria.iter()
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether no ordering was requested.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// Validates every criterion's field against the query type's whitelist.
///
/// Fails on the first field the type does not declare, reporting the field
/// and the query type. Request order is preserved and duplicates are kept;
/// a field requested twice is simply applied twice.
pub fn resolve_sorting<'a, E, D>(criteria: &'a [SortCriterion]) -> QueryResult<ResolvedSorting<'a>>
where
    E: ProcessEngine,
    D: QueryDefinition<E>,
{
    for criterion in criteria {
        if !D::is_valid_sort_field(&criterion.sort_by) {
            return Err(QueryError::InvalidSortField {
                field: criterion.sort_by.clone(),
                query_type: D::QUERY_TYPE,
            });
        }
    }
    Ok(ResolvedSorting { criteria })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sort_parameters_mean_no_criteria() {
        let criteria = sorting_from_params(&RequestParams::new()).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_pairs_combine_by_position() {
        let params: RequestParams = [
            ("sortBy", "createTime"),
            ("sortOrder", "desc"),
            ("sortBy", "incidentId"),
            ("sortOrder", "asc"),
        ]
        .into_iter()
        .collect();

        let criteria = sorting_from_params(&params).unwrap();
        assert_eq!(
            criteria,
            vec![
                SortCriterion::descending("createTime"),
                SortCriterion::ascending("incidentId"),
            ]
        );
    }

    #[test]
    fn test_sort_by_without_sort_order_is_rejected() {
        let params: RequestParams = [("sortBy", "createTime")].into_iter().collect();
        let err = sorting_from_params(&params).unwrap_err();
        assert!(matches!(err, QueryError::InvalidSorting { .. }));

        let params: RequestParams = [("sortOrder", "asc")].into_iter().collect();
        assert!(matches!(
            sorting_from_params(&params).unwrap_err(),
            QueryError::InvalidSorting { .. }
        ));
    }

    #[test]
    fn test_mismatched_pair_counts_are_rejected() {
        let params: RequestParams = [
            ("sortBy", "createTime"),
            ("sortBy", "incidentId"),
            ("sortOrder", "asc"),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            sorting_from_params(&params).unwrap_err(),
            QueryError::InvalidSorting { .. }
        ));
    }

    #[test]
    fn test_unknown_direction_token_is_a_conversion_error() {
        let params: RequestParams =
            [("sortBy", "createTime"), ("sortOrder", "ascending")].into_iter().collect();
        match sorting_from_params(&params).unwrap_err() {
            QueryError::InvalidParameter { parameter, source } => {
                assert_eq!(parameter, "sortOrder");
                assert_eq!(source, ConvertError::InvalidSortOrder("ascending".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_criterion_deserializes_from_json() {
        let criterion: SortCriterion =
            serde_json::from_str(r#"{"sortBy": "createTime", "sortOrder": "desc"}"#).unwrap();
        assert_eq!(criterion, SortCriterion::descending("createTime"));
    }
}
