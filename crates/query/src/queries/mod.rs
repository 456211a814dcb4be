//! Concrete query types.
//!
//! One module per query type: the typed filter holder, its parameter
//! binding table, and its [`QueryDefinition`](crate::QueryDefinition)
//! implementation.

mod historic_incident;
mod process_instance;

pub use historic_incident::HistoricIncidentQueryDefinition;
pub use process_instance::ProcessInstanceQueryDefinition;
