/// Lead enrichment template
///
/// Fans a new lead out to several enrichment providers in parallel, then merges the results.

use crate::workflow::{
    BlockGroupDefinition, BlockGroupType, EdgeDefinition, StepDefinition, WorkflowDefinition, START_STEP_TYPE,
};
use serde_json::json;
use uuid::uuid;

pub fn lead_enrichment() -> WorkflowDefinition {
    WorkflowDefinition::new(
        uuid!("a7c3d0f4-1b6e-4c2a-8d9f-3e5b7a1c2d02"),
        "lead-enrichment",
        "Lead Enrichment",
        "Enriches a new lead with company and social data from parallel lookups and stores the merged profile.",
    )
    .with_version(2)
    .with_step(
        StepDefinition::new("start", "New Lead", START_STEP_TYPE)
            .with_trigger("webhook", json!({ "path": "/leads", "method": "POST" }))
            .at(40.0, 180.0),
    )
    .with_group(
        BlockGroupDefinition::new("enrich", "Enrich in Parallel", BlockGroupType::Parallel)
            .with_config(json!({ "fail_fast": false, "timeout_ms": 15000 }))
            .layout(280.0, 60.0, 420.0, 300.0),
    )
    .with_step(
        StepDefinition::new("company_lookup", "Company Lookup", "http")
            .in_group("enrich")
            .with_config(json!({
                "url": "{{env.COMPANY_API}}/companies?domain={{start.body.email_domain}}",
                "method": "GET"
            }))
            .at(320.0, 110.0),
    )
    .with_step(
        StepDefinition::new("social_lookup", "Social Lookup", "http")
            .in_group("enrich")
            .with_config(json!({
                "url": "{{env.SOCIAL_API}}/profiles?email={{start.body.email}}",
                "method": "GET"
            }))
            .at(320.0, 260.0),
    )
    .with_step(
        StepDefinition::new("merge", "Merge Profile", "function")
            .with_config(json!({
                "code": "return { ...input.start.body, company: input.company_lookup, social: input.social_lookup }"
            }))
            .at(780.0, 180.0),
    )
    .with_step(
        StepDefinition::new("store", "Store Lead", "database")
            .with_config(json!({ "table": "leads", "operation": "upsert", "key": "email" }))
            .at(1020.0, 180.0),
    )
    .with_edge(EdgeDefinition::to_group("start", "enrich"))
    .with_edge(EdgeDefinition::to_step("company_lookup", "merge"))
    .with_edge(EdgeDefinition::to_step("social_lookup", "merge"))
    .with_edge(EdgeDefinition::to_step("merge", "store"))
}
