//! End-to-end scenarios against the in-memory backend.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use conflux_engine::backends::memory::MemoryEngine;
use conflux_engine::history::{HistoricIncident, IncidentState};
use conflux_engine::runtime::ProcessInstance;
use conflux_query::{HistoricIncidentQueryDefinition, PageSpec, QueryService, RequestParams};

fn incident(id: &str, incident_type: &str, state: IncidentState, hour: u32) -> HistoricIncident {
    HistoricIncident {
        id: id.to_string(),
        incident_type: incident_type.to_string(),
        create_time: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        end_time: None,
        incident_message: None,
        execution_id: None,
        activity_id: None,
        process_instance_id: None,
        process_definition_id: None,
        cause_incident_id: None,
        root_cause_incident_id: None,
        configuration: None,
        job_definition_id: None,
        tenant_id: None,
        state,
    }
}

fn instance(id: &str, key: &str, business_key: Option<&str>) -> ProcessInstance {
    ProcessInstance {
        id: id.to_string(),
        process_definition_id: format!("{key}:1"),
        process_definition_key: key.to_string(),
        business_key: business_key.map(str::to_string),
        super_process_instance_id: None,
        tenant_id: None,
        suspended: false,
    }
}

fn seeded_service() -> QueryService<MemoryEngine> {
    let mut resolved_early = incident("i-1", "failedJob", IncidentState::Resolved, 8);
    resolved_early.end_time = Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    resolved_early.tenant_id = Some("tenant-a".to_string());

    let mut resolved_late = incident("i-2", "failedJob", IncidentState::Resolved, 11);
    resolved_late.end_time = Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

    let open = incident("i-3", "failedJob", IncidentState::Open, 9);
    let other_type = incident("i-4", "failedExternalTask", IncidentState::Resolved, 10);

    let engine = MemoryEngine::new()
        .with_incidents(vec![resolved_late, open, resolved_early, other_type])
        .with_process_instances(vec![
            instance("p-1", "order", Some("order-81")),
            instance("p-2", "order", Some("order-82")),
            instance("p-3", "shipment", None),
        ]);

    QueryService::new(Arc::new(engine))
}

fn params(pairs: &[(&str, &str)]) -> RequestParams {
    pairs.iter().copied().collect()
}

#[test]
fn filters_and_sorting_select_and_order_matches() {
    let incidents = seeded_service()
        .historic_incidents(
            &params(&[
                ("incidentType", "failedJob"),
                ("resolved", "true"),
                ("sortBy", "createTime"),
                ("sortOrder", "asc"),
            ]),
            &PageSpec::UNBOUNDED,
        )
        .unwrap();

    let ids: Vec<&str> = incidents.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["i-1", "i-2"]);
}

#[test]
fn descending_sort_reverses_the_listing() {
    let incidents = seeded_service()
        .historic_incidents(
            &params(&[("sortBy", "createTime"), ("sortOrder", "desc")]),
            &PageSpec::UNBOUNDED,
        )
        .unwrap();

    let ids: Vec<&str> = incidents.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["i-2", "i-4", "i-3", "i-1"]);
}

#[test]
fn page_bounds_cut_a_window_out_of_the_ordered_listing() {
    let incidents = seeded_service()
        .historic_incidents(
            &params(&[("sortBy", "createTime"), ("sortOrder", "asc")]),
            &PageSpec::new(Some(1), Some(2)),
        )
        .unwrap();

    let ids: Vec<&str> = incidents.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["i-3", "i-4"]);
}

#[test]
fn single_bound_defaults_the_other() {
    let service = seeded_service();
    let sorted = params(&[("sortBy", "incidentId"), ("sortOrder", "asc")]);

    let tail = service
        .historic_incidents(&sorted, &PageSpec::new(Some(3), None))
        .unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id, "i-4");

    let head = service
        .historic_incidents(&sorted, &PageSpec::new(None, Some(1)))
        .unwrap();
    assert_eq!(head.len(), 1);
    assert_eq!(head[0].id, "i-1");
}

#[test]
fn count_matches_the_unbounded_listing() {
    let service = seeded_service();
    let filter = params(&[("incidentType", "failedJob"), ("resolved", "true")]);

    let listed = service
        .historic_incidents(&filter, &PageSpec::UNBOUNDED)
        .unwrap();
    let counted = service.historic_incident_count(&filter).unwrap();
    assert_eq!(counted, listed.len() as u64);
    assert_eq!(counted, 2);
}

#[test]
fn tenant_membership_filters_end_to_end() {
    let incidents = seeded_service()
        .historic_incidents(
            &params(&[("tenantIdIn", "tenant-a,tenant-b")]),
            &PageSpec::UNBOUNDED,
        )
        .unwrap();

    assert_eq!(incidents.len(), 1);
    assert_eq!(incidents[0].id, "i-1");
}

#[test]
fn open_marker_false_does_not_restrict_to_closed() {
    // open=false must list exactly what omitting the parameter lists.
    let service = seeded_service();
    let with_false = service
        .historic_incidents(&params(&[("open", "false")]), &PageSpec::UNBOUNDED)
        .unwrap();
    let without = service
        .historic_incidents(&RequestParams::new(), &PageSpec::UNBOUNDED)
        .unwrap();

    assert_eq!(with_false, without);
    assert_eq!(with_false.len(), 4);
}

#[test]
fn json_document_executes_like_bound_parameters() {
    let service = seeded_service();

    let definition: HistoricIncidentQueryDefinition = serde_json::from_str(
        r#"{
            "incidentType": "failedJob",
            "resolved": true,
            "sorting": [{"sortBy": "createTime", "sortOrder": "asc"}]
        }"#,
    )
    .unwrap();
    let from_document = service
        .list_query(&definition, &PageSpec::UNBOUNDED)
        .unwrap();

    let from_params = service
        .historic_incidents(
            &params(&[
                ("incidentType", "failedJob"),
                ("resolved", "true"),
                ("sortBy", "createTime"),
                ("sortOrder", "asc"),
            ]),
            &PageSpec::UNBOUNDED,
        )
        .unwrap();

    assert_eq!(from_document, from_params);
}

#[test]
fn process_instances_filter_and_sort() {
    let service = seeded_service();

    let instances = service
        .process_instances(
            &params(&[
                ("processDefinitionKey", "order"),
                ("sortBy", "businessKey"),
                ("sortOrder", "desc"),
            ]),
            &PageSpec::UNBOUNDED,
        )
        .unwrap();

    let keys: Vec<Option<&str>> = instances
        .iter()
        .map(|i| i.business_key.as_deref())
        .collect();
    assert_eq!(keys, vec![Some("order-82"), Some("order-81")]);
}

#[test]
fn process_instance_id_list_parameter() {
    let instances = seeded_service()
        .process_instances(
            &params(&[("processInstanceIds", "p-1,p-3")]),
            &PageSpec::UNBOUNDED,
        )
        .unwrap();

    let mut ids: Vec<&str> = instances.iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["p-1", "p-3"]);
}

#[test]
fn process_instance_count() {
    let total = seeded_service()
        .process_instance_count(&params(&[("processDefinitionKey", "order")]))
        .unwrap();
    assert_eq!(total, 2);
}
