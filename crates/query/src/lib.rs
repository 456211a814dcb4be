//! # conflux-query - Request-Parameter Binding and Query Execution
//!
//! This crate sits between a service boundary (HTTP layer, CLI, message
//! consumer) and the Conflux engine's query API. It turns an untyped,
//! multi-valued parameter map into a validated, typed query, applies
//! whitelist-checked result ordering, and executes the query as a plain
//! listing, a page, or a count.
//!
//! ## Design
//!
//! Each query type declares its accepted parameters once, as a `const`
//! table of [`ParamBinding`]s, and its sortable fields once, as the key
//! set of its sort-applier mapping. The generic machinery (binder, sort
//! resolver, executor, service façade) is shared by every query type
//! through the [`QueryDefinition`] trait, so adding a query type adds
//! declarations, not machinery.
//!
//! Untrusted input is rejected deterministically: malformed values fail
//! the whole bind naming the parameter, unknown sort fields fail before
//! any engine call, and engine-level rejections surface as request-level
//! failures. Parameters no query type declares are ignored, so callers
//! may send newer parameters without breaking older deployments.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use conflux_engine::backends::memory::MemoryEngine;
//! use conflux_query::{PageSpec, QueryService, RequestParams};
//!
//! # fn main() -> Result<(), conflux_query::QueryError> {
//! let service = QueryService::new(Arc::new(MemoryEngine::new()));
//!
//! let mut params = RequestParams::new();
//! params.append("incidentType", "failedJob");
//! params.append("resolved", "true");
//! params.append("sortBy", "createTime");
//! params.append("sortOrder", "asc");
//!
//! let incidents = service.historic_incidents(&params, &PageSpec::UNBOUNDED)?;
//! assert!(incidents.is_empty());
//!
//! let total = service.historic_incident_count(&params)?;
//! assert_eq!(total, 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`params`] - The raw, multi-valued parameter map
//! - [`convert`] - Text-to-typed-value converters
//! - [`binding`] - Declarative parameter binding tables and the binder
//! - [`sort`] - Sort criteria, extraction, and whitelist resolution
//! - [`page`] - Page bounds and path selection
//! - [`definition`] - The contract concrete query types implement
//! - [`queries`] - The concrete query types
//! - [`executor`] - Generic execution over a bound definition
//! - [`service`] - The façade a boundary adapter calls
//! - [`error`] - Error types and client-error classification

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod binding;
pub mod convert;
pub mod definition;
pub mod error;
pub mod executor;
pub mod page;
pub mod params;
pub mod queries;
pub mod service;
pub mod sort;

pub use binding::{ParamBinding, bind_parameters};
pub use definition::{QueryDefinition, SortApplier};
pub use error::{QueryError, QueryResult};
pub use page::PageSpec;
pub use params::RequestParams;
pub use queries::{HistoricIncidentQueryDefinition, ProcessInstanceQueryDefinition};
pub use service::{QueryService, QueryServiceConfig};
pub use sort::{SortCriterion, SortOrder};
