/// Built-in system workflow templates
///
/// One builder per template. Builders are pure functions returning fully populated
/// definitions; step configuration payloads are opaque to this crate and are
/// interpreted by the execution engine and block catalog.

mod batch_digest;
mod lead_enrichment;
mod support_agent;
mod ticket_triage;
mod webhook_relay;

pub use batch_digest::batch_digest;
pub use lead_enrichment::lead_enrichment;
pub use support_agent::support_agent;
pub use ticket_triage::ticket_triage;
pub use webhook_relay::webhook_relay;

use crate::workflow::WorkflowDefinition;

/// Every built-in template, in catalog order
pub fn all() -> Vec<WorkflowDefinition> {
    vec![
        support_agent(),
        lead_enrichment(),
        webhook_relay(),
        batch_digest(),
        ticket_triage(),
    ]
}
