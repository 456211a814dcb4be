//! Running process instances and their query handle.

use serde::{Deserialize, Serialize};

use crate::query::Query;

/// A running process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    /// Unique id of the instance.
    pub id: String,

    /// Id of the process definition the instance was started from.
    pub process_definition_id: String,

    /// Key of the process definition the instance was started from.
    pub process_definition_key: String,

    /// Business key assigned at start, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_key: Option<String>,

    /// Id of the super process instance, for instances started by a call
    /// activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_process_instance_id: Option<String>,

    /// Tenant the instance belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Whether the instance is suspended.
    #[serde(default)]
    pub suspended: bool,
}

/// Query handle over running process instances.
///
/// Filter calls are conjunctive. [`active`](ProcessInstanceQuery::active)
/// and [`suspended`](ProcessInstanceQuery::suspended) are markers over the
/// suspension state; applying both yields no matches.
pub trait ProcessInstanceQuery: Query<Item = ProcessInstance> {
    /// Restricts to instances with any of the given ids.
    fn process_instance_ids(&mut self, process_instance_ids: &[String]);

    /// Restricts to instances with the given business key.
    fn business_key(&mut self, business_key: &str);

    /// Restricts to instances of the given process definition id.
    fn process_definition_id(&mut self, process_definition_id: &str);

    /// Restricts to instances of the given process definition key.
    fn process_definition_key(&mut self, process_definition_key: &str);

    /// Restricts to sub instances of the given super process instance.
    fn super_process_instance(&mut self, super_process_instance_id: &str);

    /// Restricts to the instance that is the super of the given sub
    /// process instance.
    fn sub_process_instance(&mut self, sub_process_instance_id: &str);

    /// Restricts to instances that are not suspended.
    fn active(&mut self);

    /// Restricts to suspended instances.
    fn suspended(&mut self);

    /// Restricts to instances belonging to any of the given tenants.
    fn tenant_id_in(&mut self, tenant_ids: &[String]);

    /// Restricts to instances that belong to no tenant.
    fn without_tenant_id(&mut self);

    /// Orders by instance id.
    fn order_by_process_instance_id(&mut self);

    /// Orders by process definition id.
    fn order_by_process_definition_id(&mut self);

    /// Orders by process definition key.
    fn order_by_process_definition_key(&mut self);

    /// Orders by business key.
    fn order_by_business_key(&mut self);

    /// Orders by tenant id.
    fn order_by_tenant_id(&mut self);
}
