/// Workflow Template Layer
///
/// This module holds the system workflow template model and the machinery around it:
/// - Type definitions (WorkflowDefinition, StepDefinition, EdgeDefinition, BlockGroupDefinition)
/// - Structural validator
/// - Petgraph flow view used for diagnostics and by the execution engine
/// - Slug-keyed registry with an ArcSwap publication wrapper

// Template type definitions
pub mod types;

// Structural integrity checks
pub mod validator;

// Petgraph flow view of a template
pub mod graph;

// Append-only catalog keyed by system slug
pub mod registry;

// Re-export commonly used types
pub use graph::{DefinitionGraph, FlowNode};
pub use registry::{RegistryError, SharedRegistry, SystemWorkflowRegistry};
pub use types::{
    BlockGroupDefinition, BlockGroupType, EdgeDefinition, EdgeTarget, Position, Size, StepDefinition,
    WorkflowDefinition, START_STEP_TYPE,
};
pub use validator::{validate, StructuralError, ValidationErrors};
