/// Ticket triage template
///
/// Classifies a support ticket and routes it by category. Bug reports go through a
/// bounded reproduction loop before a bug is filed.

use crate::workflow::{
    BlockGroupDefinition, BlockGroupType, EdgeDefinition, StepDefinition, WorkflowDefinition, START_STEP_TYPE,
};
use serde_json::json;
use uuid::uuid;

pub fn ticket_triage() -> WorkflowDefinition {
    WorkflowDefinition::new(
        uuid!("0f1e2d3c-4b5a-4697-8877-66a5b4c3d205"),
        "ticket-triage",
        "Ticket Triage",
        "Classifies incoming tickets, routes billing and general questions, and attempts to reproduce bug reports.",
    )
    .with_version(2)
    .with_step(
        StepDefinition::new("start", "New Ticket", START_STEP_TYPE)
            .with_trigger("webhook", json!({ "path": "/tickets", "method": "POST" }))
            .at(40.0, 240.0),
    )
    .with_step(
        StepDefinition::new("classify", "Classify Ticket", "llm")
            .with_config(json!({
                "model": "gpt-4o-mini",
                "prompt": "Classify this ticket as billing, bug or other:\n{{start.body.text}}",
                "response_format": { "category": "string" }
            }))
            .at(240.0, 240.0),
    )
    .with_step(
        StepDefinition::new("route", "Route by Category", "switch")
            .with_config(json!({
                "value": "{{classify.category}}",
                "cases": ["billing", "bug"],
                "default": "other"
            }))
            .at(440.0, 240.0),
    )
    .with_step(
        StepDefinition::new("billing_queue", "Billing Queue", "http")
            .with_config(json!({ "url": "{{env.HELPDESK_API}}/queues/billing", "method": "POST" }))
            .at(680.0, 80.0),
    )
    .with_step(
        StepDefinition::new("general_queue", "General Queue", "http")
            .with_config(json!({ "url": "{{env.HELPDESK_API}}/queues/general", "method": "POST" }))
            .at(680.0, 420.0),
    )
    .with_group(
        BlockGroupDefinition::new("reproduce", "Reproduce Bug", BlockGroupType::While)
            .with_config(json!({ "condition": "{{check_repro.result}} == false", "max_iterations": 3 }))
            .layout(660.0, 180.0, 420.0, 200.0),
    )
    .with_step(
        StepDefinition::new("attempt_repro", "Attempt Reproduction", "function")
            .in_group("reproduce")
            .with_config(json!({ "code": "return sandbox.run(input.start.body.steps)" }))
            .at(700.0, 240.0),
    )
    .with_step(
        StepDefinition::new("check_repro", "Reproduced?", "condition")
            .in_group("reproduce")
            .with_config(json!({ "expression": "{{attempt_repro.failed}} == true" }))
            .at(900.0, 240.0),
    )
    .with_step(
        StepDefinition::new("file_bug", "File Bug", "http")
            .with_config(json!({ "url": "{{env.TRACKER_API}}/issues", "method": "POST" }))
            .at(1160.0, 240.0),
    )
    .with_edge(EdgeDefinition::to_step("start", "classify"))
    .with_edge(EdgeDefinition::to_step("classify", "route"))
    .with_edge(EdgeDefinition::to_step("route", "billing_queue").from_port("billing"))
    .with_edge(EdgeDefinition::to_group("route", "reproduce").from_port("bug"))
    .with_edge(EdgeDefinition::to_step("route", "general_queue").from_port("other"))
    .with_edge(EdgeDefinition::to_step("attempt_repro", "check_repro"))
    .with_edge(EdgeDefinition::to_step("check_repro", "file_bug").from_port("true"))
}
