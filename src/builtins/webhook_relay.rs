/// Webhook relay template
///
/// Forwards an inbound webhook to a downstream endpoint inside a try/catch block and
/// branches on the downstream status.

use crate::workflow::{
    BlockGroupDefinition, BlockGroupType, EdgeDefinition, StepDefinition, WorkflowDefinition, START_STEP_TYPE,
};
use serde_json::json;
use uuid::uuid;

pub fn webhook_relay() -> WorkflowDefinition {
    WorkflowDefinition::new(
        uuid!("c1e2f3a4-5b6c-4d7e-8f90-1a2b3c4d5e03"),
        "webhook-relay",
        "Webhook Relay",
        "Relays inbound webhooks to a downstream service with error handling and alerting on failures.",
    )
    .with_step(
        StepDefinition::new("start", "Inbound Webhook", START_STEP_TYPE)
            .with_trigger("webhook", json!({ "path": "/relay", "method": "POST" }))
            .at(40.0, 200.0),
    )
    .with_group(
        BlockGroupDefinition::new("guarded", "Guarded Forward", BlockGroupType::TryCatch)
            .with_config(json!({ "retries": 2, "backoff_ms": 500 }))
            .layout(260.0, 80.0, 460.0, 320.0),
    )
    .with_step(
        StepDefinition::new("forward", "Forward Request", "http")
            .in_group("guarded")
            .with_config(json!({
                "url": "{{env.RELAY_TARGET}}",
                "method": "POST",
                "body": "{{start.body}}"
            }))
            .at(300.0, 140.0),
    )
    .with_step(
        StepDefinition::new("check_status", "Accepted?", "condition")
            .in_group("guarded")
            .with_config(json!({ "expression": "{{forward.status}} < 300" }))
            .at(520.0, 140.0),
    )
    .with_step(
        StepDefinition::new("on_error", "Capture Error", "function")
            .in_group("guarded")
            .with_config(json!({ "code": "return { error: input.error.message }" }))
            .at(300.0, 300.0),
    )
    .with_step(
        StepDefinition::new("ack", "Acknowledge", "response")
            .with_config(json!({ "status": 202 }))
            .at(820.0, 120.0),
    )
    .with_step(
        StepDefinition::new("alert", "Alert On-Call", "notification")
            .with_config(json!({ "channel": "ops-alerts", "message": "Relay failed for {{start.body.id}}" }))
            .at(820.0, 300.0),
    )
    .with_edge(EdgeDefinition::to_group("start", "guarded"))
    .with_edge(EdgeDefinition::to_step("forward", "check_status"))
    .with_edge(EdgeDefinition::to_step("forward", "on_error").from_port("error"))
    .with_edge(EdgeDefinition::to_step("check_status", "ack").from_port("true"))
    .with_edge(EdgeDefinition::to_step("check_status", "alert").from_port("false"))
    .with_edge(EdgeDefinition::to_step("on_error", "alert"))
}
