//! Shared test support: an engine whose handles record every call.
//!
//! The recorded call log is what the contract tests assert on: which
//! filter calls a definition issued, in what order ordering was applied,
//! and which terminal operation ran. Handle creation is recorded too, so
//! "no engine interaction" is an empty log.

use std::sync::{Arc, Mutex};

use conflux_engine::ProcessEngine;
use conflux_engine::error::{EngineError, EngineResult};
use conflux_engine::history::{HistoricIncident, HistoricIncidentQuery};
use conflux_engine::query::Query;
use conflux_engine::runtime::{ProcessInstance, ProcessInstanceQuery};

/// Engine that records every call made through its handles.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Arc<Mutex<Vec<String>>>,
    fail_with: Option<EngineError>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose terminal operations fail with the given error.
    pub fn failing(error: EngineError) -> Self {
        RecordingEngine {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(error),
        }
    }

    /// The calls recorded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// The recorded filter calls (everything that is not handle creation,
    /// ordering, or a terminal operation).
    pub fn filter_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| {
                !call.starts_with("create")
                    && !call.starts_with("orderBy")
                    && call != "asc"
                    && call != "desc"
                    && call != "list"
                    && call != "count"
                    && !call.starts_with("listPage")
            })
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl ProcessEngine for RecordingEngine {
    type HistoricIncidentQuery = RecordingIncidentQuery;
    type ProcessInstanceQuery = RecordingInstanceQuery;

    fn create_historic_incident_query(&self) -> RecordingIncidentQuery {
        self.record("createHistoricIncidentQuery");
        RecordingIncidentQuery {
            calls: Arc::clone(&self.calls),
            fail_with: self.fail_with.clone(),
        }
    }

    fn create_process_instance_query(&self) -> RecordingInstanceQuery {
        self.record("createProcessInstanceQuery");
        RecordingInstanceQuery {
            calls: Arc::clone(&self.calls),
            fail_with: self.fail_with.clone(),
        }
    }
}

pub struct RecordingIncidentQuery {
    calls: Arc<Mutex<Vec<String>>>,
    fail_with: Option<EngineError>,
}

impl RecordingIncidentQuery {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn finish<T: Default>(self) -> EngineResult<T> {
        match self.fail_with {
            Some(error) => Err(error),
            None => Ok(T::default()),
        }
    }
}

impl Query for RecordingIncidentQuery {
    type Item = HistoricIncident;

    fn asc(&mut self) {
        self.record("asc");
    }

    fn desc(&mut self) {
        self.record("desc");
    }

    fn list(self) -> EngineResult<Vec<HistoricIncident>> {
        self.record("list");
        self.finish()
    }

    fn list_page(self, first_result: u32, max_results: u32) -> EngineResult<Vec<HistoricIncident>> {
        self.record(format!("listPage({first_result},{max_results})"));
        self.finish()
    }

    fn count(self) -> EngineResult<u64> {
        self.record("count");
        self.finish()
    }
}

impl HistoricIncidentQuery for RecordingIncidentQuery {
    fn incident_id(&mut self, incident_id: &str) {
        self.record(format!("incidentId({incident_id})"));
    }

    fn incident_type(&mut self, incident_type: &str) {
        self.record(format!("incidentType({incident_type})"));
    }

    fn incident_message(&mut self, incident_message: &str) {
        self.record(format!("incidentMessage({incident_message})"));
    }

    fn process_definition_id(&mut self, process_definition_id: &str) {
        self.record(format!("processDefinitionId({process_definition_id})"));
    }

    fn process_instance_id(&mut self, process_instance_id: &str) {
        self.record(format!("processInstanceId({process_instance_id})"));
    }

    fn execution_id(&mut self, execution_id: &str) {
        self.record(format!("executionId({execution_id})"));
    }

    fn activity_id(&mut self, activity_id: &str) {
        self.record(format!("activityId({activity_id})"));
    }

    fn cause_incident_id(&mut self, cause_incident_id: &str) {
        self.record(format!("causeIncidentId({cause_incident_id})"));
    }

    fn root_cause_incident_id(&mut self, root_cause_incident_id: &str) {
        self.record(format!("rootCauseIncidentId({root_cause_incident_id})"));
    }

    fn configuration(&mut self, configuration: &str) {
        self.record(format!("configuration({configuration})"));
    }

    fn open(&mut self) {
        self.record("open()");
    }

    fn resolved(&mut self) {
        self.record("resolved()");
    }

    fn deleted(&mut self) {
        self.record("deleted()");
    }

    fn tenant_id_in(&mut self, tenant_ids: &[String]) {
        self.record(format!("tenantIdIn({})", tenant_ids.join(",")));
    }

    fn job_definition_id_in(&mut self, job_definition_ids: &[String]) {
        self.record(format!("jobDefinitionIdIn({})", job_definition_ids.join(",")));
    }

    fn order_by_incident_id(&mut self) {
        self.record("orderByIncidentId");
    }

    fn order_by_incident_message(&mut self) {
        self.record("orderByIncidentMessage");
    }

    fn order_by_create_time(&mut self) {
        self.record("orderByCreateTime");
    }

    fn order_by_end_time(&mut self) {
        self.record("orderByEndTime");
    }

    fn order_by_incident_type(&mut self) {
        self.record("orderByIncidentType");
    }

    fn order_by_execution_id(&mut self) {
        self.record("orderByExecutionId");
    }

    fn order_by_activity_id(&mut self) {
        self.record("orderByActivityId");
    }

    fn order_by_process_instance_id(&mut self) {
        self.record("orderByProcessInstanceId");
    }

    fn order_by_process_definition_id(&mut self) {
        self.record("orderByProcessDefinitionId");
    }

    fn order_by_cause_incident_id(&mut self) {
        self.record("orderByCauseIncidentId");
    }

    fn order_by_root_cause_incident_id(&mut self) {
        self.record("orderByRootCauseIncidentId");
    }

    fn order_by_configuration(&mut self) {
        self.record("orderByConfiguration");
    }

    fn order_by_tenant_id(&mut self) {
        self.record("orderByTenantId");
    }

    fn order_by_incident_state(&mut self) {
        self.record("orderByIncidentState");
    }
}

pub struct RecordingInstanceQuery {
    calls: Arc<Mutex<Vec<String>>>,
    fail_with: Option<EngineError>,
}

impl RecordingInstanceQuery {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn finish<T: Default>(self) -> EngineResult<T> {
        match self.fail_with {
            Some(error) => Err(error),
            None => Ok(T::default()),
        }
    }
}

impl Query for RecordingInstanceQuery {
    type Item = ProcessInstance;

    fn asc(&mut self) {
        self.record("asc");
    }

    fn desc(&mut self) {
        self.record("desc");
    }

    fn list(self) -> EngineResult<Vec<ProcessInstance>> {
        self.record("list");
        self.finish()
    }

    fn list_page(self, first_result: u32, max_results: u32) -> EngineResult<Vec<ProcessInstance>> {
        self.record(format!("listPage({first_result},{max_results})"));
        self.finish()
    }

    fn count(self) -> EngineResult<u64> {
        self.record("count");
        self.finish()
    }
}

impl ProcessInstanceQuery for RecordingInstanceQuery {
    fn process_instance_ids(&mut self, process_instance_ids: &[String]) {
        self.record(format!(
            "processInstanceIds({})",
            process_instance_ids.join(",")
        ));
    }

    fn business_key(&mut self, business_key: &str) {
        self.record(format!("businessKey({business_key})"));
    }

    fn process_definition_id(&mut self, process_definition_id: &str) {
        self.record(format!("processDefinitionId({process_definition_id})"));
    }

    fn process_definition_key(&mut self, process_definition_key: &str) {
        self.record(format!("processDefinitionKey({process_definition_key})"));
    }

    fn super_process_instance(&mut self, super_process_instance_id: &str) {
        self.record(format!("superProcessInstance({super_process_instance_id})"));
    }

    fn sub_process_instance(&mut self, sub_process_instance_id: &str) {
        self.record(format!("subProcessInstance({sub_process_instance_id})"));
    }

    fn active(&mut self) {
        self.record("active()");
    }

    fn suspended(&mut self) {
        self.record("suspended()");
    }

    fn tenant_id_in(&mut self, tenant_ids: &[String]) {
        self.record(format!("tenantIdIn({})", tenant_ids.join(",")));
    }

    fn without_tenant_id(&mut self) {
        self.record("withoutTenantId()");
    }

    fn order_by_process_instance_id(&mut self) {
        self.record("orderByProcessInstanceId");
    }

    fn order_by_process_definition_id(&mut self) {
        self.record("orderByProcessDefinitionId");
    }

    fn order_by_process_definition_key(&mut self) {
        self.record("orderByProcessDefinitionKey");
    }

    fn order_by_business_key(&mut self) {
        self.record("orderByBusinessKey");
    }

    fn order_by_tenant_id(&mut self) {
        self.record("orderByTenantId");
    }
}
