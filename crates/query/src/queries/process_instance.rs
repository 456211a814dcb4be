//! The process instance query type.

use serde::Deserialize;

use conflux_engine::ProcessEngine;
use conflux_engine::runtime::ProcessInstanceQuery;

use crate::binding::ParamBinding;
use crate::convert;
use crate::definition::{QueryDefinition, SortApplier};
use crate::sort::SortCriterion;

/// Typed filter values for a running process instance search.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessInstanceQueryDefinition {
    /// Instance ids to match any of.
    pub process_instance_ids: Option<Vec<String>>,

    /// Business key to match.
    pub business_key: Option<String>,

    /// Process definition id to match.
    pub process_definition_id: Option<String>,

    /// Process definition key to match.
    pub process_definition_key: Option<String>,

    /// Super process instance whose sub instances to match.
    pub super_process_instance: Option<String>,

    /// Sub process instance whose super instance to match.
    pub sub_process_instance: Option<String>,

    /// Marker: restrict to instances that are not suspended. Only `true`
    /// filters.
    pub active: Option<bool>,

    /// Marker: restrict to suspended instances. Only `true` filters.
    pub suspended: Option<bool>,

    /// Tenant ids to match any of.
    #[serde(rename = "tenantIdIn")]
    pub tenant_ids: Option<Vec<String>>,

    /// Marker: restrict to instances without a tenant. Only `true`
    /// filters.
    pub without_tenant_id: Option<bool>,

    /// Requested result ordering.
    pub sorting: Vec<SortCriterion>,
}

impl ProcessInstanceQueryDefinition {
    const PARAM_BINDINGS: &'static [ParamBinding<Self>] = &[
        ParamBinding {
            name: "processInstanceIds",
            apply: |definition, values| {
                definition.process_instance_ids = Some(convert::string_list(values));
                Ok(())
            },
        },
        ParamBinding {
            name: "businessKey",
            apply: |definition, values| {
                definition.business_key = Some(convert::string(values)?);
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
            name: "processDefinitionKey",
            apply: |definition, values| {
                definition.process_definition_key = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "superProcessInstance",
            apply: |definition, values| {
                definition.super_process_instance = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "subProcessInstance",
            apply: |definition, values| {
                definition.sub_process_instance = Some(convert::string(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "active",
            apply: |definition, values| {
                definition.active = Some(convert::boolean(values)?);
                Ok(())
            },
        },
        ParamBinding {
            name: "suspended",
            apply: |definition, values| {
                definition.suspended = Some(convert::boolean(values)?);
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
            name: "withoutTenantId",
            apply: |definition, values| {
                definition.without_tenant_id = Some(convert::boolean(values)?);
                Ok(())
            },
        },
    ];
}

impl<E: ProcessEngine> QueryDefinition<E> for ProcessInstanceQueryDefinition {
    type Query = E::ProcessInstanceQuery;

    const QUERY_TYPE: &'static str = "process instance";

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
        engine.create_process_instance_query()
    }

    fn apply_filters(&self, query: &mut Self::Query) {
        if let Some(process_instance_ids) = &self.process_instance_ids {
            if !process_instance_ids.is_empty() {
                query.process_instance_ids(process_instance_ids);
            }
        }
        if let Some(business_key) = &self.business_key {
            query.business_key(business_key);
        }
        if let Some(process_definition_id) = &self.process_definition_id {
            query.process_definition_id(process_definition_id);
        }
        if let Some(process_definition_key) = &self.process_definition_key {
            query.process_definition_key(process_definition_key);
        }
        if let Some(super_process_instance) = &self.super_process_instance {
            query.super_process_instance(super_process_instance);
        }
        if let Some(sub_process_instance) = &self.sub_process_instance {
            query.sub_process_instance(sub_process_instance);
        }
        if self.active == Some(true) {
            query.active();
        }
        if self.suspended == Some(true) {
            query.suspended();
        }
        if let Some(tenant_ids) = &self.tenant_ids {
            if !tenant_ids.is_empty() {
                query.tenant_id_in(tenant_ids);
            }
        }
        if self.without_tenant_id == Some(true) {
            query.without_tenant_id();
        }
    }

    fn sort_applier(field: &str) -> Option<SortApplier<Self::Query>> {
        let applier: SortApplier<Self::Query> = match field {
            "instanceId" => |query| query.order_by_process_instance_id(),
            "definitionId" => |query| query.order_by_process_definition_id(),
            "definitionKey" => |query| query.order_by_process_definition_key(),
            "businessKey" => |query| query.order_by_business_key(),
            "tenantId" => |query| query.order_by_tenant_id(),
            _ => return None,
        };
        Some(applier)
    }
}
