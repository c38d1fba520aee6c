/// Catalog assembly and rendering
///
/// Wires the built-in builders into a published registry and renders the catalog for
/// the CLI. Registration failures abort startup: a malformed built-in is a bug.

use crate::{
    builtins,
    config::{CatalogConfig, Config, OutputFormat},
    workflow::{SharedRegistry, SystemWorkflowRegistry, WorkflowDefinition},
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Build and publish the built-in catalog
pub fn build_catalog(config: &Config) -> Result<SharedRegistry> {
    tracing::info!("📚 Building system workflow catalog");
    tracing::debug!("⚙️ Catalog configuration: {:?}", config.catalog);

    let definitions = builtins::all();
    tracing::debug!("📦 Registering {} built-in templates", definitions.len());

    let registry = SystemWorkflowRegistry::from_definitions(definitions)
        .context("Failed to register built-in workflow templates")?;

    tracing::info!("✅ Catalog ready with {} templates", registry.count());

    Ok(SharedRegistry::new(registry))
}

/// Render the catalog (or a single template) in the configured format
pub fn render(registry: &SystemWorkflowRegistry, config: &CatalogConfig) -> Result<String> {
    let templates: Vec<Arc<WorkflowDefinition>> = match &config.slug {
        Some(slug) => {
            let definition = registry
                .get_by_slug(slug)
                .ok_or_else(|| anyhow::anyhow!("Unknown template requested: {}", slug))?;
            vec![definition]
        }
        None => registry.get_all().to_vec(),
    };
    let selected: Vec<&WorkflowDefinition> = templates.iter().map(|wf| wf.as_ref()).collect();

    match config.output {
        OutputFormat::Summary => Ok(render_summary(&selected)),
        OutputFormat::Json => {
            let json = match (config.slug.is_some(), selected.as_slice()) {
                (true, [single]) => serde_json::to_string_pretty(single),
                _ => serde_json::to_string_pretty(&selected),
            };
            json.context("Failed to serialize workflow templates")
        }
    }
}

fn render_summary(definitions: &[&WorkflowDefinition]) -> String {
    let mut out = String::new();
    for wf in definitions {
        let entry_points: Vec<&str> = wf.entry_points().map(|step| step.temp_id.as_str()).collect();
        out.push_str(&format!(
            "{:<18} v{:<3} {:>2} steps {:>2} edges {:>2} groups  entry: {:<20} {}\n",
            wf.system_slug,
            wf.version,
            wf.steps.len(),
            wf.edges.len(),
            wf.block_groups.len(),
            entry_points.join(","),
            wf.name
        ));
    }
    out
}
