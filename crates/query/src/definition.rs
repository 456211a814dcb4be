//! The contract every concrete query type implements.
//!
//! A query definition is the typed holder for one request's filter values
//! plus the static knowledge about its query type: which parameters bind
//! onto it, which fields it may be ordered by, and how it builds and
//! narrows an engine handle. The generic binder, resolver, and executor
//! operate only through this trait.

use conflux_engine::{ProcessEngine, Query};

use crate::binding::{ParamBinding, bind_parameters};
use crate::error::QueryResult;
use crate::params::RequestParams;
use crate::sort::{SortCriterion, sorting_from_params};

/// An ordering call on a query handle, selected by whitelist lookup.
pub type SortApplier<Q> = fn(&mut Q);

/// A concrete query type over engine `E`.
pub trait QueryDefinition<E: ProcessEngine>: Default + 'static {
    /// The engine handle this query type builds.
    type Query: Query;

    /// Label used in error messages, e.g. `historic incident`.
    const QUERY_TYPE: &'static str;

    /// The declared parameter bindings for this query type.
    ///
    /// Built once at compile time; the binder walks it per request.
    fn param_bindings() -> &'static [ParamBinding<Self>];

    /// The requested sort criteria, in request order.
    fn sorting(&self) -> &[SortCriterion];

    /// Stores the requested sort criteria.
    fn set_sorting(&mut self, sorting: Vec<SortCriterion>);

    /// Obtains a fresh engine handle for this query type.
    fn create_query(engine: &E) -> Self::Query;

    /// Applies one filter call per set field to the handle.
    ///
    /// Unset fields apply nothing. Marker booleans apply their call only
    /// when explicitly `true`; `false` behaves exactly like unset. List
    /// filters apply only when non-empty.
    fn apply_filters(&self, query: &mut Self::Query);

    /// Maps a sort field name to its ordering call.
    ///
    /// The key set of this mapping is the query type's sort whitelist, so
    /// an unknown field can never silently order nothing: lookup failure
    /// is the validation error path.
    fn sort_applier(field: &str) -> Option<SortApplier<Self::Query>>;

    /// Whether the field is a valid sort target for this query type.
    fn is_valid_sort_field(field: &str) -> bool {
        Self::sort_applier(field).is_some()
    }

    /// Binds a definition from raw request parameters.
    ///
    /// Combines the declared parameter bindings with `sortBy`/`sortOrder`
    /// extraction. Fails without a partial result on the first offending
    /// parameter.
    fn from_params(params: &RequestParams) -> QueryResult<Self> {
        let mut definition = bind_parameters(Self::param_bindings(), params)?;
        definition.set_sorting(sorting_from_params(params)?);
        Ok(definition)
    }
}
