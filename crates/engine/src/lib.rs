//! # conflux-engine - Conflux Process Engine Query API
//!
//! This crate defines the query capability of the Conflux process engine:
//! the handle types a caller uses to search historic and runtime process
//! data, and the engine contract that produces those handles. The REST-facing
//! layers consume these traits without knowing which backend is behind them.
//!
//! ## Querying
//!
//! A query is built in three steps: obtain a fresh handle from the engine,
//! narrow it with setter-style filter calls, then run exactly one terminal
//! operation. Handles belong to a single request and are consumed by the
//! terminal operation, so they cannot be cached or replayed.
//!
//! ```rust
//! use conflux_engine::{ProcessEngine, Query};
//! use conflux_engine::history::HistoricIncidentQuery;
//! use conflux_engine::backends::memory::MemoryEngine;
//!
//! # fn main() -> Result<(), conflux_engine::EngineError> {
//! let engine = MemoryEngine::new();
//!
//! let mut query = engine.create_historic_incident_query();
//! query.incident_type("failedJob");
//! query.open();
//! query.order_by_create_time();
//! query.desc();
//!
//! let incidents = query.list()?;
//! assert!(incidents.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`query`] - The base [`Query`] contract (ordering direction, terminal
//!   operations)
//! - [`history`] - Historic incident records and their query handle
//! - [`runtime`] - Process instance records and their query handle
//! - [`error`] - Engine execution errors
//! - [`backends`] - Backend implementations (in-memory reference backend)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod error;
pub mod history;
pub mod query;
pub mod runtime;

pub use error::{EngineError, EngineResult};
pub use query::Query;

use history::HistoricIncidentQuery;
use runtime::ProcessInstanceQuery;

/// The engine-side entry point for building queries.
///
/// Each call produces a fresh handle scoped to this engine; the handle
/// accumulates filters and ordering and is consumed by a terminal
/// operation of [`Query`].
pub trait ProcessEngine {
    /// Handle type for historic incident queries.
    type HistoricIncidentQuery: HistoricIncidentQuery;

    /// Handle type for process instance queries.
    type ProcessInstanceQuery: ProcessInstanceQuery;

    /// Creates a fresh historic incident query.
    fn create_historic_incident_query(&self) -> Self::HistoricIncidentQuery;

    /// Creates a fresh process instance query.
    fn create_process_instance_query(&self) -> Self::ProcessInstanceQuery;
}
