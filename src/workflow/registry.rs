/// System workflow registry
///
/// Catalog of built-in templates keyed by slug. It is filled once at startup by a
/// single owner, then only read. `SharedRegistry` publishes it behind ArcSwap so a
/// rebuilt catalog can replace the old one atomically while readers keep the
/// snapshot they already loaded.

use crate::builtins;
use crate::workflow::graph::DefinitionGraph;
use crate::workflow::types::WorkflowDefinition;
use crate::workflow::validator::{validate, ValidationErrors};
use arc_swap::ArcSwap;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;

/// Reasons a definition is refused by the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("workflow '{0}' is not marked as a system workflow")]
    NotSystem(String),

    #[error("system slug already registered: {0}")]
    DuplicateSlug(String),
}

/// Append-only catalog of system workflow templates
///
/// Definitions are stored behind `Arc` so lookups hand out cheap clones that stay
/// valid after the registry itself is swapped out.
#[derive(Debug, Default)]
pub struct SystemWorkflowRegistry {
    /// Definitions in registration order
    workflows: Vec<Arc<WorkflowDefinition>>,
    /// Key: system slug, Value: position in `workflows`
    by_slug: HashMap<String, usize>,
}

impl SystemWorkflowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the complete built-in catalog
    ///
    /// # Panics
    ///
    /// Panics if a built-in template is malformed or two built-ins share a slug.
    /// Built-ins are code, so this is a programming error caught at startup.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for definition in builtins::all() {
            registry.register(definition);
        }
        registry
    }

    /// Build a registry from definitions, stopping at the first refused one
    pub fn from_definitions<I>(definitions: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = WorkflowDefinition>,
    {
        let mut registry = Self::new();
        for definition in definitions {
            registry.try_register(definition)?;
        }
        Ok(registry)
    }

    /// Register a definition, failing fast on any refusal
    ///
    /// # Panics
    ///
    /// Panics with the registry error when the definition is refused.
    pub fn register(&mut self, definition: WorkflowDefinition) {
        if let Err(e) = self.try_register(definition) {
            panic!("failed to register built-in workflow: {}", e);
        }
    }

    /// Validate and register a definition
    ///
    /// Refuses structurally invalid definitions, non-system workflows, and slug collisions.
    /// The registry is left untouched on refusal.
    pub fn try_register(&mut self, definition: WorkflowDefinition) -> Result<(), RegistryError> {
        validate(&definition)?;

        if !definition.is_system {
            return Err(RegistryError::NotSystem(definition.system_slug));
        }

        if self.by_slug.contains_key(&definition.system_slug) {
            return Err(RegistryError::DuplicateSlug(definition.system_slug));
        }

        let graph = DefinitionGraph::build(&definition);
        let unreachable = graph.unreachable_steps();
        if !unreachable.is_empty() {
            tracing::warn!(
                "⚠️ Workflow '{}' has steps unreachable from any entry point: {:?}",
                definition.system_slug,
                unreachable
            );
        }
        if graph.has_cycles() {
            tracing::warn!("⚠️ Workflow '{}' contains edge cycles", definition.system_slug);
        }

        tracing::debug!(
            "➕ Registered system workflow '{}' v{} ({} steps, {} edges, {} groups)",
            definition.system_slug,
            definition.version,
            definition.steps.len(),
            definition.edges.len(),
            definition.block_groups.len()
        );

        self.by_slug
            .insert(definition.system_slug.clone(), self.workflows.len());
        self.workflows.push(Arc::new(definition));

        Ok(())
    }

    /// All definitions in registration order
    pub fn get_all(&self) -> &[Arc<WorkflowDefinition>] {
        &self.workflows
    }

    /// Look up a definition by slug; `None` is an ordinary outcome
    pub fn get_by_slug(&self, slug: &str) -> Option<Arc<WorkflowDefinition>> {
        self.by_slug
            .get(slug)
            .map(|&index| Arc::clone(&self.workflows[index]))
    }

    pub fn count(&self) -> usize {
        self.workflows.len()
    }

    /// Registered slugs in registration order
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.workflows.iter().map(|wf| wf.system_slug.as_str())
    }
}

/// Lock-free published registry for concurrent readers
///
/// Uses ArcSwap so a complete replacement catalog can be swapped in atomically.
/// Published definitions are never mutated; a reload always builds a new registry.
#[derive(Debug)]
pub struct SharedRegistry {
    current: ArcSwap<SystemWorkflowRegistry>,
}

impl SharedRegistry {
    /// Publish a fully built registry
    pub fn new(registry: SystemWorkflowRegistry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// Snapshot of the current registry (lock-free read)
    pub fn load(&self) -> Arc<SystemWorkflowRegistry> {
        self.current.load_full()
    }

    /// Atomically replace the published registry
    pub fn replace(&self, registry: SystemWorkflowRegistry) {
        let count = registry.count();
        self.current.store(Arc::new(registry));
        tracing::info!("🔄 Swapped system workflow registry ({} templates)", count);
    }

    /// Build a new registry and publish it only if every definition is accepted
    pub fn rebuild<I>(&self, definitions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = WorkflowDefinition>,
    {
        let registry = SystemWorkflowRegistry::from_definitions(definitions)?;
        self.replace(registry);
        Ok(())
    }
}
