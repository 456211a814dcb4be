//! Historic incident records and their query handle.
//!
//! An incident is raised when the engine cannot make progress on a process
//! instance (a failed job, an unhandled error event). Historic incidents
//! keep the full lifecycle: they stay queryable after being resolved or
//! deleted, carrying the state they ended in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::query::Query;

/// Lifecycle state of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentState {
    /// The incident is unresolved and blocks its process instance.
    Open,
    /// The incident was resolved, e.g. by a successful job retry.
    Resolved,
    /// The incident was removed together with its scope.
    Deleted,
}

impl fmt::Display for IncidentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentState::Open => write!(f, "open"),
            IncidentState::Resolved => write!(f, "resolved"),
            IncidentState::Deleted => write!(f, "deleted"),
        }
    }
}

/// A historic incident record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricIncident {
    /// Unique id of the incident.
    pub id: String,

    /// The type of the incident, e.g. `failedJob`.
    pub incident_type: String,

    /// When the incident was created.
    pub create_time: DateTime<Utc>,

    /// When the incident left the open state, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Message describing the cause, e.g. the failing job's exception text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_message: Option<String>,

    /// Id of the execution the incident happened in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,

    /// Id of the activity the incident happened at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,

    /// Id of the process instance the incident belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_instance_id: Option<String>,

    /// Id of the process definition the incident belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_definition_id: Option<String>,

    /// Id of the incident this one was caused by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause_incident_id: Option<String>,

    /// Id of the incident at the root of the cause chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause_incident_id: Option<String>,

    /// Payload of the incident, e.g. the id of the failed job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,

    /// Id of the job definition, for job-related incidents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_definition_id: Option<String>,

    /// Tenant the incident belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Lifecycle state the incident is in.
    pub state: IncidentState,
}

impl HistoricIncident {
    /// Whether the incident is still open.
    pub fn is_open(&self) -> bool {
        self.state == IncidentState::Open
    }
}

/// Query handle over historic incidents.
///
/// Filter calls are conjunctive: a record matches when it satisfies every
/// filter applied to the handle. Marker calls (`open`, `resolved`,
/// `deleted`) restrict to the named lifecycle state and take no argument;
/// there is no "not in state" variant.
pub trait HistoricIncidentQuery: Query<Item = HistoricIncident> {
    /// Restricts to the incident with the given id.
    fn incident_id(&mut self, incident_id: &str);

    /// Restricts to incidents of the given type.
    fn incident_type(&mut self, incident_type: &str);

    /// Restricts to incidents with the given message.
    fn incident_message(&mut self, incident_message: &str);

    /// Restricts to incidents of the given process definition.
    fn process_definition_id(&mut self, process_definition_id: &str);

    /// Restricts to incidents of the given process instance.
    fn process_instance_id(&mut self, process_instance_id: &str);

    /// Restricts to incidents raised in the given execution.
    fn execution_id(&mut self, execution_id: &str);

    /// Restricts to incidents raised at the given activity.
    fn activity_id(&mut self, activity_id: &str);

    /// Restricts to incidents caused by the given incident.
    fn cause_incident_id(&mut self, cause_incident_id: &str);

    /// Restricts to incidents with the given root cause incident.
    fn root_cause_incident_id(&mut self, root_cause_incident_id: &str);

    /// Restricts to incidents with the given configuration payload.
    fn configuration(&mut self, configuration: &str);

    /// Restricts to open incidents.
    fn open(&mut self);

    /// Restricts to resolved incidents.
    fn resolved(&mut self);

    /// Restricts to deleted incidents.
    fn deleted(&mut self);

    /// Restricts to incidents belonging to any of the given tenants.
    fn tenant_id_in(&mut self, tenant_ids: &[String]);

    /// Restricts to incidents of any of the given job definitions.
    fn job_definition_id_in(&mut self, job_definition_ids: &[String]);

    /// Orders by incident id.
    fn order_by_incident_id(&mut self);

    /// Orders by incident message.
    fn order_by_incident_message(&mut self);

    /// Orders by creation time.
    fn order_by_create_time(&mut self);

    /// Orders by end time.
    fn order_by_end_time(&mut self);

    /// Orders by incident type.
    fn order_by_incident_type(&mut self);

    /// Orders by execution id.
    fn order_by_execution_id(&mut self);

    /// Orders by activity id.
    fn order_by_activity_id(&mut self);

    /// Orders by process instance id.
    fn order_by_process_instance_id(&mut self);

    /// Orders by process definition id.
    fn order_by_process_definition_id(&mut self);

    /// Orders by cause incident id.
    fn order_by_cause_incident_id(&mut self);

    /// Orders by root cause incident id.
    fn order_by_root_cause_incident_id(&mut self);

    /// Orders by configuration payload.
    fn order_by_configuration(&mut self);

    /// Orders by tenant id.
    fn order_by_tenant_id(&mut self);

    /// Orders by incident state.
    fn order_by_incident_state(&mut self);
}
