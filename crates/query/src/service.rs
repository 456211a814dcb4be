//! The query service façade.
//!
//! One service per engine: binds raw parameters (or accepts a
//! deserialized definition), checks the configured result cap, and runs
//! the generic executor. This is the layer a boundary adapter calls, and
//! the only layer that emits tracing events.

use std::sync::Arc;

use tracing::debug;

use conflux_engine::ProcessEngine;
use conflux_engine::history::HistoricIncident;
use conflux_engine::runtime::ProcessInstance;

use crate::definition::QueryDefinition;
use crate::error::{QueryError, QueryResult};
use crate::executor::{QueryItem, execute_count, execute_list};
use crate::page::PageSpec;
use crate::params::RequestParams;
use crate::queries::{HistoricIncidentQueryDefinition, ProcessInstanceQueryDefinition};

/// Configuration for the query service.
#[derive(Debug, Clone, Default)]
pub struct QueryServiceConfig {
    /// Optional cap on list result counts.
    ///
    /// When set, a list request must carry an explicit `maxResults` at or
    /// below this value; unbounded listings are rejected before the engine
    /// is touched. Counts are unaffected.
    pub max_results_limit: Option<u32>,
}

/// Service façade over one engine.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use conflux_engine::backends::memory::MemoryEngine;
/// use conflux_query::{PageSpec, QueryService, RequestParams};
///
/// # fn main() -> Result<(), conflux_query::QueryError> {
/// let service = QueryService::new(Arc::new(MemoryEngine::new()));
///
/// let mut params = RequestParams::new();
/// params.append("incidentType", "failedJob");
///
/// let incidents = service.historic_incidents(&params, &PageSpec::UNBOUNDED)?;
/// assert!(incidents.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct QueryService<E> {
    engine: Arc<E>,
    config: QueryServiceConfig,
}

// Manually implement Clone since E is behind an Arc and need not be Clone.
impl<E> Clone for QueryService<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            config: self.config.clone(),
        }
    }
}

impl<E: ProcessEngine> QueryService<E> {
    /// Creates a service with default configuration.
    pub fn new(engine: Arc<E>) -> Self {
        Self::with_config(engine, QueryServiceConfig::default())
    }

    /// Creates a service with the given configuration.
    pub fn with_config(engine: Arc<E>, config: QueryServiceConfig) -> Self {
        Self { engine, config }
    }

    /// The engine queries run against.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The active configuration.
    pub fn config(&self) -> &QueryServiceConfig {
        &self.config
    }

    /// Binds raw parameters to query type `D` and executes a listing.
    pub fn list<D>(&self, params: &RequestParams, page: &PageSpec) -> QueryResult<Vec<QueryItem<E, D>>>
    where
        D: QueryDefinition<E>,
    {
        let definition = D::from_params(params)?;
        self.list_query(&definition, page)
    }

    /// Executes a listing for an already bound definition.
    pub fn list_query<D>(&self, definition: &D, page: &PageSpec) -> QueryResult<Vec<QueryItem<E, D>>>
    where
        D: QueryDefinition<E>,
    {
        self.check_results_limit(page)?;
        debug!(
            query_type = D::QUERY_TYPE,
            bounded = page.is_bounded(),
            sort_criteria = definition.sorting().len(),
            "executing list query"
        );
        execute_list(self.engine.as_ref(), definition, page)
    }

    /// Binds raw parameters to query type `D` and executes a count.
    pub fn count<D>(&self, params: &RequestParams) -> QueryResult<u64>
    where
        D: QueryDefinition<E>,
    {
        let definition = D::from_params(params)?;
        self.count_query(&definition)
    }

    /// Executes a count for an already bound definition.
    pub fn count_query<D>(&self, definition: &D) -> QueryResult<u64>
    where
        D: QueryDefinition<E>,
    {
        debug!(query_type = D::QUERY_TYPE, "executing count query");
        execute_count(self.engine.as_ref(), definition)
    }

    /// Lists historic incidents matching the raw parameters.
    pub fn historic_incidents(
        &self,
        params: &RequestParams,
        page: &PageSpec,
    ) -> QueryResult<Vec<HistoricIncident>> {
        self.list::<HistoricIncidentQueryDefinition>(params, page)
    }

    /// Counts historic incidents matching the raw parameters.
    pub fn historic_incident_count(&self, params: &RequestParams) -> QueryResult<u64> {
        self.count::<HistoricIncidentQueryDefinition>(params)
    }

    /// Lists process instances matching the raw parameters.
    pub fn process_instances(
        &self,
        params: &RequestParams,
        page: &PageSpec,
    ) -> QueryResult<Vec<ProcessInstance>> {
        self.list::<ProcessInstanceQueryDefinition>(params, page)
    }

    /// Counts process instances matching the raw parameters.
    pub fn process_instance_count(&self, params: &RequestParams) -> QueryResult<u64> {
        self.count::<ProcessInstanceQueryDefinition>(params)
    }

    fn check_results_limit(&self, page: &PageSpec) -> QueryResult<()> {
        let Some(limit) = self.config.max_results_limit else {
            return Ok(());
        };
        match page.max_results() {
            Some(max_results) if max_results <= limit => Ok(()),
            _ => Err(QueryError::MaxResultsExceeded { limit }),
        }
    }
}
