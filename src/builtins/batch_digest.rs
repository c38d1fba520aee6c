/// Batch digest template
///
/// Summarizes every new item since the last run and mails a digest. Runs on a
/// schedule or on demand, so it has two entry points.

use crate::workflow::{
    BlockGroupDefinition, BlockGroupType, EdgeDefinition, StepDefinition, WorkflowDefinition, START_STEP_TYPE,
};
use serde_json::json;
use uuid::uuid;

pub fn batch_digest() -> WorkflowDefinition {
    WorkflowDefinition::new(
        uuid!("e4f5a6b7-c8d9-4e0f-a1b2-c3d4e5f6a704"),
        "batch-digest",
        "Batch Digest",
        "Collects new items, summarizes each with an LLM, and emails a daily digest.",
    )
    .with_version(4)
    .with_step(
        StepDefinition::new("scheduled", "Every Morning", START_STEP_TYPE)
            .with_trigger("schedule", json!({ "cron": "0 0 7 * * *", "timezone": "UTC" }))
            .at(40.0, 100.0),
    )
    .with_step(
        StepDefinition::new("manual", "Run Now", START_STEP_TYPE)
            .with_trigger("manual", json!({}))
            .at(40.0, 260.0),
    )
    .with_step(
        StepDefinition::new("fetch_items", "Fetch New Items", "database")
            .with_config(json!({
                "table": "items",
                "operation": "select",
                "where": "created_at > {{state.last_run}}"
            }))
            .at(260.0, 180.0),
    )
    .with_group(
        BlockGroupDefinition::new("each_item", "For Each Item", BlockGroupType::Foreach)
            .with_config(json!({ "items": "{{fetch_items.rows}}", "concurrency": 4 }))
            .layout(480.0, 80.0, 440.0, 220.0),
    )
    .with_step(
        StepDefinition::new("summarize", "Summarize", "llm")
            .in_group("each_item")
            .with_config(json!({
                "model": "gpt-4o-mini",
                "prompt": "Summarize in two sentences:\n{{item.body}}"
            }))
            .at(520.0, 140.0),
    )
    .with_step(
        StepDefinition::new("collect", "Collect Summary", "function")
            .in_group("each_item")
            .with_config(json!({ "code": "state.summaries.push(input.summarize.text)" }))
            .at(720.0, 140.0),
    )
    .with_step(
        StepDefinition::new("send_digest", "Send Digest", "email")
            .with_config(json!({
                "to": "{{env.DIGEST_RECIPIENTS}}",
                "subject": "Daily digest",
                "body": "{{state.summaries | join('\\n\\n')}}"
            }))
            .at(1000.0, 180.0),
    )
    .with_edge(EdgeDefinition::to_step("scheduled", "fetch_items"))
    .with_edge(EdgeDefinition::to_step("manual", "fetch_items"))
    .with_edge(EdgeDefinition::to_group("fetch_items", "each_item"))
    .with_edge(EdgeDefinition::to_step("summarize", "collect"))
    .with_edge(EdgeDefinition::to_step("collect", "send_digest"))
}
