//! In-memory engine backend.
//!
//! Evaluates queries against record sets seeded at construction. Matching,
//! ordering, and paging semantics live entirely here, behind the same
//! traits a production backend implements. Handles snapshot the record set
//! on creation; the engine itself is cheap to clone and safe to share.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::ProcessEngine;
use crate::error::{EngineError, EngineResult};
use crate::history::{HistoricIncident, HistoricIncidentQuery, IncidentState};
use crate::query::Query;
use crate::runtime::{ProcessInstance, ProcessInstanceQuery};

/// In-memory process engine over seeded record sets.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    incidents: Arc<Vec<HistoricIncident>>,
    instances: Arc<Vec<ProcessInstance>>,
}

impl MemoryEngine {
    /// Creates an engine with empty record sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the historic incident records.
    pub fn with_incidents(mut self, incidents: Vec<HistoricIncident>) -> Self {
        self.incidents = Arc::new(incidents);
        self
    }

    /// Replaces the process instance records.
    pub fn with_process_instances(mut self, instances: Vec<ProcessInstance>) -> Self {
        self.instances = Arc::new(instances);
        self
    }

    /// The seeded historic incident records.
    pub fn incidents(&self) -> &[HistoricIncident] {
        &self.incidents
    }

    /// The seeded process instance records.
    pub fn process_instances(&self) -> &[ProcessInstance] {
        &self.instances
    }
}

impl ProcessEngine for MemoryEngine {
    type HistoricIncidentQuery = MemoryHistoricIncidentQuery;
    type ProcessInstanceQuery = MemoryProcessInstanceQuery;

    fn create_historic_incident_query(&self) -> MemoryHistoricIncidentQuery {
        MemoryHistoricIncidentQuery {
            records: Arc::clone(&self.incidents),
            filters: Vec::new(),
            ordering: Vec::new(),
            rejected: None,
        }
    }

    fn create_process_instance_query(&self) -> MemoryProcessInstanceQuery {
        MemoryProcessInstanceQuery {
            records: Arc::clone(&self.instances),
            filters: Vec::new(),
            ordering: Vec::new(),
            rejected: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug)]
struct OrderingStep<K> {
    key: K,
    direction: Direction,
}

impl<K> OrderingStep<K> {
    fn new(key: K) -> Self {
        OrderingStep {
            key,
            direction: Direction::Ascending,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Records the direction for the most recent ordering step, or the misuse
/// if no ordering step was selected yet.
fn set_direction<K>(
    ordering: &mut [OrderingStep<K>],
    rejected: &mut Option<String>,
    direction: Direction,
) {
    match ordering.last_mut() {
        Some(step) => step.direction = direction,
        None => {
            rejected.get_or_insert_with(|| {
                "direction specified before an ordering field was selected".to_string()
            });
        }
    }
}

/// Compares optional values, sorting absent ones first.
fn compare_options<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

fn paged<T>(records: Vec<T>, first_result: u32, max_results: u32) -> Vec<T> {
    records
        .into_iter()
        .skip(first_result as usize)
        .take(max_results as usize)
        .collect()
}

#[derive(Debug)]
enum IncidentFilter {
    IncidentId(String),
    IncidentType(String),
    IncidentMessage(String),
    ProcessDefinitionId(String),
    ProcessInstanceId(String),
    ExecutionId(String),
    ActivityId(String),
    CauseIncidentId(String),
    RootCauseIncidentId(String),
    Configuration(String),
    State(IncidentState),
    TenantIdIn(Vec<String>),
    JobDefinitionIdIn(Vec<String>),
}

impl IncidentFilter {
    fn matches(&self, incident: &HistoricIncident) -> bool {
        match self {
            IncidentFilter::IncidentId(id) => incident.id == *id,
            IncidentFilter::IncidentType(value) => incident.incident_type == *value,
            IncidentFilter::IncidentMessage(value) => {
                incident.incident_message.as_deref() == Some(value.as_str())
            }
            IncidentFilter::ProcessDefinitionId(value) => {
                incident.process_definition_id.as_deref() == Some(value.as_str())
            }
            IncidentFilter::ProcessInstanceId(value) => {
                incident.process_instance_id.as_deref() == Some(value.as_str())
            }
            IncidentFilter::ExecutionId(value) => {
                incident.execution_id.as_deref() == Some(value.as_str())
            }
            IncidentFilter::ActivityId(value) => {
                incident.activity_id.as_deref() == Some(value.as_str())
            }
            IncidentFilter::CauseIncidentId(value) => {
                incident.cause_incident_id.as_deref() == Some(value.as_str())
            }
            IncidentFilter::RootCauseIncidentId(value) => {
                incident.root_cause_incident_id.as_deref() == Some(value.as_str())
            }
            IncidentFilter::Configuration(value) => {
                incident.configuration.as_deref() == Some(value.as_str())
            }
            IncidentFilter::State(state) => incident.state == *state,
            IncidentFilter::TenantIdIn(ids) => {
                incident.tenant_id.as_ref().is_some_and(|id| ids.contains(id))
            }
            IncidentFilter::JobDefinitionIdIn(ids) => incident
                .job_definition_id
                .as_ref()
                .is_some_and(|id| ids.contains(id)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum IncidentSortKey {
    IncidentId,
    IncidentMessage,
    CreateTime,
    EndTime,
    IncidentType,
    ExecutionId,
    ActivityId,
    ProcessInstanceId,
    ProcessDefinitionId,
    CauseIncidentId,
    RootCauseIncidentId,
    Configuration,
    TenantId,
    IncidentState,
}

fn compare_incidents(a: &HistoricIncident, b: &HistoricIncident, key: IncidentSortKey) -> Ordering {
    match key {
        IncidentSortKey::IncidentId => a.id.cmp(&b.id),
        IncidentSortKey::IncidentMessage => {
            compare_options(a.incident_message.as_ref(), b.incident_message.as_ref())
        }
        IncidentSortKey::CreateTime => a.create_time.cmp(&b.create_time),
        IncidentSortKey::EndTime => compare_options(a.end_time.as_ref(), b.end_time.as_ref()),
        IncidentSortKey::IncidentType => a.incident_type.cmp(&b.incident_type),
        IncidentSortKey::ExecutionId => {
            compare_options(a.execution_id.as_ref(), b.execution_id.as_ref())
        }
        IncidentSortKey::ActivityId => {
            compare_options(a.activity_id.as_ref(), b.activity_id.as_ref())
        }
        IncidentSortKey::ProcessInstanceId => {
            compare_options(a.process_instance_id.as_ref(), b.process_instance_id.as_ref())
        }
        IncidentSortKey::ProcessDefinitionId => compare_options(
            a.process_definition_id.as_ref(),
            b.process_definition_id.as_ref(),
        ),
        IncidentSortKey::CauseIncidentId => {
            compare_options(a.cause_incident_id.as_ref(), b.cause_incident_id.as_ref())
        }
        IncidentSortKey::RootCauseIncidentId => compare_options(
            a.root_cause_incident_id.as_ref(),
            b.root_cause_incident_id.as_ref(),
        ),
        IncidentSortKey::Configuration => {
            compare_options(a.configuration.as_ref(), b.configuration.as_ref())
        }
        IncidentSortKey::TenantId => compare_options(a.tenant_id.as_ref(), b.tenant_id.as_ref()),
        IncidentSortKey::IncidentState => a.state.cmp(&b.state),
    }
}

/// Historic incident query over the in-memory record set.
#[derive(Debug)]
pub struct MemoryHistoricIncidentQuery {
    records: Arc<Vec<HistoricIncident>>,
    filters: Vec<IncidentFilter>,
    ordering: Vec<OrderingStep<IncidentSortKey>>,
    rejected: Option<String>,
}

impl MemoryHistoricIncidentQuery {
    fn execute(self) -> EngineResult<Vec<HistoricIncident>> {
        if let Some(message) = self.rejected {
            return Err(EngineError::rejected(message));
        }
        let mut matches: Vec<HistoricIncident> = self
            .records
            .iter()
            .filter(|incident| self.filters.iter().all(|filter| filter.matches(incident)))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            self.ordering.iter().fold(Ordering::Equal, |acc, step| {
                acc.then_with(|| step.apply(compare_incidents(a, b, step.key)))
            })
        });
        Ok(matches)
    }
}

impl Query for MemoryHistoricIncidentQuery {
    type Item = HistoricIncident;

    fn asc(&mut self) {
        set_direction(&mut self.ordering, &mut self.rejected, Direction::Ascending);
    }

    fn desc(&mut self) {
        set_direction(&mut self.ordering, &mut self.rejected, Direction::Descending);
    }

    fn list(self) -> EngineResult<Vec<HistoricIncident>> {
        self.execute()
    }

    fn list_page(self, first_result: u32, max_results: u32) -> EngineResult<Vec<HistoricIncident>> {
        Ok(paged(self.execute()?, first_result, max_results))
    }

    fn count(self) -> EngineResult<u64> {
        Ok(self.execute()?.len() as u64)
    }
}

impl HistoricIncidentQuery for MemoryHistoricIncidentQuery {
    fn incident_id(&mut self, incident_id: &str) {
        self.filters
            .push(IncidentFilter::IncidentId(incident_id.to_string()));
    }

    fn incident_type(&mut self, incident_type: &str) {
        self.filters
            .push(IncidentFilter::IncidentType(incident_type.to_string()));
    }

    fn incident_message(&mut self, incident_message: &str) {
        self.filters
            .push(IncidentFilter::IncidentMessage(incident_message.to_string()));
    }

    fn process_definition_id(&mut self, process_definition_id: &str) {
        self.filters.push(IncidentFilter::ProcessDefinitionId(
            process_definition_id.to_string(),
        ));
    }

    fn process_instance_id(&mut self, process_instance_id: &str) {
        self.filters.push(IncidentFilter::ProcessInstanceId(
            process_instance_id.to_string(),
        ));
    }

    fn execution_id(&mut self, execution_id: &str) {
        self.filters
            .push(IncidentFilter::ExecutionId(execution_id.to_string()));
    }

    fn activity_id(&mut self, activity_id: &str) {
        self.filters
            .push(IncidentFilter::ActivityId(activity_id.to_string()));
    }

    fn cause_incident_id(&mut self, cause_incident_id: &str) {
        self.filters
            .push(IncidentFilter::CauseIncidentId(cause_incident_id.to_string()));
    }

    fn root_cause_incident_id(&mut self, root_cause_incident_id: &str) {
        self.filters.push(IncidentFilter::RootCauseIncidentId(
            root_cause_incident_id.to_string(),
        ));
    }

    fn configuration(&mut self, configuration: &str) {
        self.filters
            .push(IncidentFilter::Configuration(configuration.to_string()));
    }

    fn open(&mut self) {
        self.filters.push(IncidentFilter::State(IncidentState::Open));
    }

    fn resolved(&mut self) {
        self.filters
            .push(IncidentFilter::State(IncidentState::Resolved));
    }

    fn deleted(&mut self) {
        self.filters
            .push(IncidentFilter::State(IncidentState::Deleted));
    }

    fn tenant_id_in(&mut self, tenant_ids: &[String]) {
        if tenant_ids.is_empty() {
            self.rejected
                .get_or_insert_with(|| "tenantIdIn requires at least one id".to_string());
        } else {
            self.filters
                .push(IncidentFilter::TenantIdIn(tenant_ids.to_vec()));
        }
    }

    fn job_definition_id_in(&mut self, job_definition_ids: &[String]) {
        if job_definition_ids.is_empty() {
            self.rejected
                .get_or_insert_with(|| "jobDefinitionIdIn requires at least one id".to_string());
        } else {
            self.filters
                .push(IncidentFilter::JobDefinitionIdIn(job_definition_ids.to_vec()));
        }
    }

    fn order_by_incident_id(&mut self) {
        self.ordering.push(OrderingStep::new(IncidentSortKey::IncidentId));
    }

    fn order_by_incident_message(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::IncidentMessage));
    }

    fn order_by_create_time(&mut self) {
        self.ordering.push(OrderingStep::new(IncidentSortKey::CreateTime));
    }

    fn order_by_end_time(&mut self) {
        self.ordering.push(OrderingStep::new(IncidentSortKey::EndTime));
    }

    fn order_by_incident_type(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::IncidentType));
    }

    fn order_by_execution_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::ExecutionId));
    }

    fn order_by_activity_id(&mut self) {
        self.ordering.push(OrderingStep::new(IncidentSortKey::ActivityId));
    }

    fn order_by_process_instance_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::ProcessInstanceId));
    }

    fn order_by_process_definition_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::ProcessDefinitionId));
    }

    fn order_by_cause_incident_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::CauseIncidentId));
    }

    fn order_by_root_cause_incident_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::RootCauseIncidentId));
    }

    fn order_by_configuration(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::Configuration));
    }

    fn order_by_tenant_id(&mut self) {
        self.ordering.push(OrderingStep::new(IncidentSortKey::TenantId));
    }

    fn order_by_incident_state(&mut self) {
        self.ordering
            .push(OrderingStep::new(IncidentSortKey::IncidentState));
    }
}

#[derive(Debug)]
enum InstanceFilter {
    ProcessInstanceIds(Vec<String>),
    BusinessKey(String),
    ProcessDefinitionId(String),
    ProcessDefinitionKey(String),
    SuperProcessInstance(String),
    SubProcessInstance(String),
    Suspended(bool),
    TenantIdIn(Vec<String>),
    WithoutTenantId,
}

impl InstanceFilter {
    fn matches(&self, instance: &ProcessInstance, all: &[ProcessInstance]) -> bool {
        match self {
            InstanceFilter::ProcessInstanceIds(ids) => ids.contains(&instance.id),
            InstanceFilter::BusinessKey(value) => {
                instance.business_key.as_deref() == Some(value.as_str())
            }
            InstanceFilter::ProcessDefinitionId(value) => instance.process_definition_id == *value,
            InstanceFilter::ProcessDefinitionKey(value) => {
                instance.process_definition_key == *value
            }
            InstanceFilter::SuperProcessInstance(super_id) => {
                instance.super_process_instance_id.as_deref() == Some(super_id.as_str())
            }
            // The instance that started the given sub instance via a call
            // activity.
            InstanceFilter::SubProcessInstance(sub_id) => all.iter().any(|sub| {
                sub.id == *sub_id
                    && sub.super_process_instance_id.as_deref() == Some(instance.id.as_str())
            }),
            InstanceFilter::Suspended(suspended) => instance.suspended == *suspended,
            InstanceFilter::TenantIdIn(ids) => {
                instance.tenant_id.as_ref().is_some_and(|id| ids.contains(id))
            }
            InstanceFilter::WithoutTenantId => instance.tenant_id.is_none(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum InstanceSortKey {
    ProcessInstanceId,
    ProcessDefinitionId,
    ProcessDefinitionKey,
    BusinessKey,
    TenantId,
}

fn compare_instances(a: &ProcessInstance, b: &ProcessInstance, key: InstanceSortKey) -> Ordering {
    match key {
        InstanceSortKey::ProcessInstanceId => a.id.cmp(&b.id),
        InstanceSortKey::ProcessDefinitionId => {
            a.process_definition_id.cmp(&b.process_definition_id)
        }
        InstanceSortKey::ProcessDefinitionKey => {
            a.process_definition_key.cmp(&b.process_definition_key)
        }
        InstanceSortKey::BusinessKey => {
            compare_options(a.business_key.as_ref(), b.business_key.as_ref())
        }
        InstanceSortKey::TenantId => compare_options(a.tenant_id.as_ref(), b.tenant_id.as_ref()),
    }
}

/// Process instance query over the in-memory record set.
#[derive(Debug)]
pub struct MemoryProcessInstanceQuery {
    records: Arc<Vec<ProcessInstance>>,
    filters: Vec<InstanceFilter>,
    ordering: Vec<OrderingStep<InstanceSortKey>>,
    rejected: Option<String>,
}

impl MemoryProcessInstanceQuery {
    fn execute(self) -> EngineResult<Vec<ProcessInstance>> {
        if let Some(message) = self.rejected {
            return Err(EngineError::rejected(message));
        }
        let mut matches: Vec<ProcessInstance> = self
            .records
            .iter()
            .filter(|instance| {
                self.filters
                    .iter()
                    .all(|filter| filter.matches(instance, &self.records))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            self.ordering.iter().fold(Ordering::Equal, |acc, step| {
                acc.then_with(|| step.apply(compare_instances(a, b, step.key)))
            })
        });
        Ok(matches)
    }
}

impl Query for MemoryProcessInstanceQuery {
    type Item = ProcessInstance;

    fn asc(&mut self) {
        set_direction(&mut self.ordering, &mut self.rejected, Direction::Ascending);
    }

    fn desc(&mut self) {
        set_direction(&mut self.ordering, &mut self.rejected, Direction::Descending);
    }

    fn list(self) -> EngineResult<Vec<ProcessInstance>> {
        self.execute()
    }

    fn list_page(self, first_result: u32, max_results: u32) -> EngineResult<Vec<ProcessInstance>> {
        Ok(paged(self.execute()?, first_result, max_results))
    }

    fn count(self) -> EngineResult<u64> {
        Ok(self.execute()?.len() as u64)
    }
}

impl ProcessInstanceQuery for MemoryProcessInstanceQuery {
    fn process_instance_ids(&mut self, process_instance_ids: &[String]) {
        if process_instance_ids.is_empty() {
            self.rejected
                .get_or_insert_with(|| "processInstanceIds requires at least one id".to_string());
        } else {
            self.filters
                .push(InstanceFilter::ProcessInstanceIds(process_instance_ids.to_vec()));
        }
    }

    fn business_key(&mut self, business_key: &str) {
        self.filters
            .push(InstanceFilter::BusinessKey(business_key.to_string()));
    }

    fn process_definition_id(&mut self, process_definition_id: &str) {
        self.filters.push(InstanceFilter::ProcessDefinitionId(
            process_definition_id.to_string(),
        ));
    }

    fn process_definition_key(&mut self, process_definition_key: &str) {
        self.filters.push(InstanceFilter::ProcessDefinitionKey(
            process_definition_key.to_string(),
        ));
    }

    fn super_process_instance(&mut self, super_process_instance_id: &str) {
        self.filters.push(InstanceFilter::SuperProcessInstance(
            super_process_instance_id.to_string(),
        ));
    }

    fn sub_process_instance(&mut self, sub_process_instance_id: &str) {
        self.filters.push(InstanceFilter::SubProcessInstance(
            sub_process_instance_id.to_string(),
        ));
    }

    fn active(&mut self) {
        self.filters.push(InstanceFilter::Suspended(false));
    }

    fn suspended(&mut self) {
        self.filters.push(InstanceFilter::Suspended(true));
    }

    fn tenant_id_in(&mut self, tenant_ids: &[String]) {
        if tenant_ids.is_empty() {
            self.rejected
                .get_or_insert_with(|| "tenantIdIn requires at least one id".to_string());
        } else {
            self.filters
                .push(InstanceFilter::TenantIdIn(tenant_ids.to_vec()));
        }
    }

    fn without_tenant_id(&mut self) {
        self.filters.push(InstanceFilter::WithoutTenantId);
    }

    fn order_by_process_instance_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(InstanceSortKey::ProcessInstanceId));
    }

    fn order_by_process_definition_id(&mut self) {
        self.ordering
            .push(OrderingStep::new(InstanceSortKey::ProcessDefinitionId));
    }

    fn order_by_process_definition_key(&mut self) {
        self.ordering
            .push(OrderingStep::new(InstanceSortKey::ProcessDefinitionKey));
    }

    fn order_by_business_key(&mut self) {
        self.ordering
            .push(OrderingStep::new(InstanceSortKey::BusinessKey));
    }

    fn order_by_tenant_id(&mut self) {
        self.ordering.push(OrderingStep::new(InstanceSortKey::TenantId));
    }
}
