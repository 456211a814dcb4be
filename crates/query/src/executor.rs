//! Generic query execution.
//!
//! The single place that turns a bound definition into engine calls:
//! resolve the sorting, obtain a handle, apply filters, apply ordering,
//! run one terminal operation. Sorting is validated before the engine is
//! touched, so a rejected request never reaches a handle.

use conflux_engine::{ProcessEngine, Query};

use crate::definition::QueryDefinition;
use crate::error::{QueryError, QueryResult};
use crate::page::PageSpec;
use crate::sort::{ResolvedSorting, SortOrder, resolve_sorting};

/// Record type produced by a query definition's handle.
pub type QueryItem<E, D> = <<D as QueryDefinition<E>>::Query as Query>::Item;

/// Executes the definition as a listing.
///
/// An unbounded page specification takes the plain listing path; a bounded
/// one takes the page path with missing bounds defaulted.
pub fn execute_list<E, D>(
    engine: &E,
    definition: &D,
    page: &PageSpec,
) -> QueryResult<Vec<QueryItem<E, D>>>
where
    E: ProcessEngine,
    D: QueryDefinition<E>,
{
    let sorting = resolve_sorting::<E, D>(definition.sorting())?;
    let query = build_query(engine, definition, sorting)?;
    if page.is_bounded() {
        query.list_page(page.effective_first_result(), page.effective_max_results())
    } else {
        query.list()
    }
    .map_err(QueryError::from)
}

/// Executes the definition as a count.
pub fn execute_count<E, D>(engine: &E, definition: &D) -> QueryResult<u64>
where
    E: ProcessEngine,
    D: QueryDefinition<E>,
{
    let sorting = resolve_sorting::<E, D>(definition.sorting())?;
    let query = build_query(engine, definition, sorting)?;
    query.count().map_err(QueryError::from)
}

/// Builds the filtered, ordered handle for one execution.
fn build_query<E, D>(
    engine: &E,
    definition: &D,
    sorting: ResolvedSorting<'_>,
) -> QueryResult<D::Query>
where
    E: ProcessEngine,
    D: QueryDefinition<E>,
{
    let mut query = D::create_query(engine);
    definition.apply_filters(&mut query);
    for criterion in sorting.iter() {
        // Resolution already vetted the field; a miss here would mean the
        // whitelist and the mapping disagree, which must surface as an
        // error rather than a silently unordered result.
        let apply = D::sort_applier(&criterion.sort_by).ok_or_else(|| {
            QueryError::InvalidSortField {
                field: criterion.sort_by.clone(),
                query_type: D::QUERY_TYPE,
            }
        })?;
        apply(&mut query);
        match criterion.sort_order {
            SortOrder::Ascending => query.asc(),
            SortOrder::Descending => query.desc(),
        }
    }
    Ok(query)
}
