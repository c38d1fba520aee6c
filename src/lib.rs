/// Mechaway Catalog: built-in system workflow templates
///
/// This library provides the catalog of system workflow templates shipped with Mechaway,
/// the structural validator that guards them, and the slug-keyed registry the execution
/// engine and the migration process read templates from.

// Core configuration
pub mod config;

// Workflow template layer - definition model, validator, flow graph and registry
pub mod workflow;

// Built-in template builders
pub mod builtins;

// Catalog assembly and rendering for the CLI
pub mod catalog;

// Re-export commonly used types for external consumers
pub use catalog::{build_catalog, render};
pub use workflow::{
    validate, SharedRegistry, StructuralError, SystemWorkflowRegistry, ValidationErrors, WorkflowDefinition,
};
