/// Customer support agent template
///
/// An LLM agent block whose member steps are exposed to the model as callable tools.

use crate::workflow::{
    BlockGroupDefinition, BlockGroupType, EdgeDefinition, StepDefinition, WorkflowDefinition, START_STEP_TYPE,
};
use serde_json::json;
use uuid::uuid;

pub fn support_agent() -> WorkflowDefinition {
    WorkflowDefinition::new(
        uuid!("5b0e6a52-8f0c-4d43-9a55-2f1d7c3e9a01"),
        "support-agent",
        "Support Agent",
        "Answers customer questions with an agent that can look up orders and search the help center.",
    )
    .with_version(3)
    .with_group(
        BlockGroupDefinition::new("agent", "Support Agent", BlockGroupType::Agent)
            .with_config(json!({
                "model": "gpt-4o-mini",
                "system_prompt": "You are a friendly support agent. Use the tools to answer accurately and never invent order data.",
                "max_iterations": 8
            }))
            .layout(320.0, 80.0, 520.0, 360.0),
    )
    .with_step(
        StepDefinition::new("start", "Incoming Message", START_STEP_TYPE)
            .with_trigger("webhook", json!({ "path": "/support/message", "method": "POST" }))
            .at(40.0, 200.0),
    )
    .with_step(
        StepDefinition::new("assistant", "Assistant", "agent")
            .in_group("agent")
            .with_config(json!({ "input": "{{start.body.message}}", "tools": "group_members" }))
            .at(360.0, 20.0),
    )
    .with_step(
        StepDefinition::new("lookup_order", "Lookup Order", "http")
            .in_group("agent")
            .with_config(json!({
                "description": "Fetch an order by its number",
                "url": "{{env.ORDERS_API}}/orders/{{order_number}}",
                "method": "GET",
                "parameters": { "order_number": { "type": "string", "required": true } }
            }))
            .at(360.0, 140.0),
    )
    .with_step(
        StepDefinition::new("search_help", "Search Help Center", "function")
            .in_group("agent")
            .with_config(json!({
                "description": "Full-text search over help center articles",
                "code": "return search(input.query, { limit: 5 })",
                "parameters": { "query": { "type": "string", "required": true } }
            }))
            .at(360.0, 300.0),
    )
    .with_step(
        StepDefinition::new("reply", "Send Reply", "response")
            .with_config(json!({ "body": "{{assistant.output}}", "status": 200 }))
            .at(900.0, 200.0),
    )
    .with_edge(EdgeDefinition::to_group("start", "agent"))
    .with_edge(EdgeDefinition::to_step("assistant", "reply"))
}
