//! The historic incident query type.

use serde::Deserialize;

use conflux_engine::ProcessEngine;
use conflux_engine::history::HistoricIncidentQuery;

use crate::binding::ParamBinding;
use crate::convert;
use crate::definition::{QueryDefinition, SortApplier};
use crate::sort::SortCriterion;

/// Typed filter values for a historic incident search.
///
/// Every field defaults to unset; only set fields turn into filter calls.
/// The struct deserializes from a JSON query document with the same
/// external names the parameter bindings use, plus a `sorting` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoricIncidentQueryDefinition {
    /// Incident id to match.
    pub incident_id: Option<String>,

    /// Incident type to match, e.g. `failedJob`.
    pub incident_type: Option<String>,

    /// Incident message to match.
    pub incident_message: Option<String>,

    /// Process definition id to match.
    pub process_definition_id: Option<String>,

    /// Process instance id to match.
    pub process_instance_id: Option<String>,

    /// Execution id to match.
    pub execution_id: Option<String>,

    /// Activity id to match.
    pub activity_id: Option<String>,

    /// Cause incident id to match.
    pub cause_incident_id: Option<String>,

    /// Root cause incident id to match.
    pub root_cause_incident_id: Option<String>,

    /// Configuration payload to match.
    pub configuration: Option<String>,

    /// Marker: restrict to open incidents. Only `true` filters.
    pub open: Option<bool>,

    /// Marker: restrict to resolved incidents. Only `true` filters.
    pub resolved: Option<bool>,

    /// Marker: restrict to deleted incidents. Only `true` filters.
    pub deleted: Option<bool>,

    /// Tenant ids to match any of.
    #[serde(rename = "tenantIdIn")]
    pub tenant_ids: Option<Vec<String>>,

    /// Job definition ids to match any of.
    #[serde(rename = "jobDefinitionIdIn")]
    pub job_definition_ids: Option<Vec<String>>,

    /// Requested result ordering.
    pub sorting: Vec<SortCriterion>,
}

impl HistoricIncidentQueryDefinition {
    const PARAM_BINDINGS: &'static [ParamBinding<Self>] = &[
        ParamBinding {
            name: "incidentId",
            apply: |definition, values| {
                definition.incident_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "incidentType",
            apply: |definition, values| {
                definition.incident_type = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "incidentMessage",
            apply: |definition, values| {
                definition.incident_message = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "processDefinitionId",
            apply: |definition, values| {
                definition.process_definition_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "processInstanceId",
            apply: |definition, values| {
                definition.process_instance_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "executionId",
            apply: |definition, values| {
                definition.execution_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "activityId",
            apply: |definition, values| {
                definition.activity_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "causeIncidentId",
            apply: |definition, values| {
                definition.cause_incident_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "rootCauseIncidentId",
            apply: |definition, values| {
                definition.root_cause_incident_id = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "configuration",
            apply: |definition, values| {
                definition.configuration = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "open",
            apply: |definition, values| {
                definition.open = Some(convert::boolean(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "resolved",
            apply: |definition, values| {
                definition.resolved = Some(convert::boolean(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "deleted",
            apply: |definition, values| {
                definition.deleted = Some(convert::boolean(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "tenantIdIn",
            apply: |definition, values| {
                definition.tenant_ids = Some(convert::string_list(values));
                Ok(())
            },
        },
        ParamBinding {
            name: "jobDefinitionIdIn",
            apply: |definition, values| {
                definition.job_definition_ids = Some(convert::string_list(values));
                Ok(())
            },
        },
    ];
}

impl<E: ProcessEngine> QueryDefinition<E> for HistoricIncidentQueryDefinition {
    type Query = E::HistoricIncidentQuery;

    const QUERY_TYPE: &'static str = "historic incident";

    fn param_bindings() -> &'static [ParamBinding<Self>] {
        Self::PARAM_BINDINGS
    }

    fn sorting(&self) -> &[SortCriterion] {
        &self.sorting
    }

    fn set_sorting(&mut self, sorting: Vec<SortCriterion>) {
        self.sorting = sorting;
    }

    fn create_query(engine: &E) -> Self::Query {
        engine.create_historic_incident_query()
    }

    fn apply_filters(&self, query: &mut Self::Query) {
        if let Some(incident_id) = &self.incident_id {
            query.incident_id(incident_id);
        }
        if let Some(incident_type) = &self.incident_type {
            query.incident_type(incident_type);
        }
        if let Some(incident_message) = &self.incident_message {
            query.incident_message(incident_message);
        }
        if let Some(process_definition_id) = &self.process_definition_id {
            query.process_definition_id(process_definition_id);
        }
        if let Some(process_instance_id) = &self.process_instance_id {
            query.process_instance_id(process_instance_id);
        }
        if let Some(execution_id) = &self.execution_id {
            query.execution_id(execution_id);
        }
        if let Some(activity_id) = &self.activity_id {
            query.activity_id(activity_id);
        }
        if let Some(cause_incident_id) = &self.cause_incident_id {
            query.cause_incident_id(cause_incident_id);
        }
        if let Some(root_cause_incident_id) = &self.root_cause_incident_id {
            query.root_cause_incident_id(root_cause_incident_id);
        }
        if let Some(configuration) = &self.configuration {
            query.configuration(configuration);
        }
        if self.open == Some(true) {
            query.open();
        }
        if self.resolved == Some(true) {
            query.resolved();
        }
        if self.deleted == Some(true) {
            query.deleted();
        }
        if let Some(tenant_ids) = &self.tenant_ids {
            if !tenant_ids.is_empty() {
                query.tenant_id_in(tenant_ids);
            }
        }
        if let Some(job_definition_ids) = &self.job_definition_ids {
            if !job_definition_ids.is_empty() {
                query.job_definition_id_in(job_definition_ids);
            }
        }
    }

    fn sort_applier(field: &str) -> Option<SortApplier<Self::Query>> {
        let applier: SortApplier<Self::Query> = match field {
            "incidentId" => |query| query.order_by_incident_id(),
            "incidentMessage" => |query| query.order_by_incident_message(),
            "createTime" => |query| query.order_by_create_time(),
            "endTime" => |query| query.order_by_end_time(),
            "incidentType" => |query| query.order_by_incident_type(),
            "executionId" => |query| query.order_by_execution_id(),
            "activityId" => |query| query.order_by_activity_id(),
            "processInstanceId" => |query| query.order_by_process_instance_id(),
            "processDefinitionId" => |query| query.order_by_process_definition_id(),
            "causeIncidentId" => |query| query.order_by_cause_incident_id(),
            "rootCauseIncidentId" => |query| query.order_by_root_cause_incident_id(),
            "configuration" => |query| query.order_by_configuration(),
            "tenantId" => |query| query.order_by_tenant_id(),
            "incidentState" => |query| query.order_by_incident_state(),
            _ => return None,
        };
        Some(applier)
    }
}
