/// Core system workflow definition types
///
/// Defines the template structures for workflows, steps, edges, and block groups.
/// Definitions are plain data: building one never fails, validity is established
/// separately by the validator. Step and group configuration is carried as opaque
/// JSON that only the execution engine interprets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Step type that marks an entry point of a workflow
pub const START_STEP_TYPE: &str = "start";

/// A complete built-in workflow template
///
/// Templates are produced by builder functions, validated and registered once at
/// startup, then served read-only to the execution engine and the migration process.
/// A template can have multiple entry points (start steps disambiguated by trigger metadata).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Stable identifier assigned by the builder
    pub id: Uuid,
    /// URL-safe registry key (e.g., "support-agent")
    pub system_slug: String,
    /// Human-readable template name
    pub name: String,
    /// Human-readable description shown in the template picker
    pub description: String,
    /// Builder-assigned version, informational only
    pub version: u32,
    /// Distinguishes built-in templates from user workflows
    pub is_system: bool,
    /// Steps in insertion order
    pub steps: Vec<StepDefinition>,
    /// Edges in insertion order
    #[serde(default)]
    pub edges: Vec<EdgeDefinition>,
    /// Composite containers (agent, parallel, try/catch, foreach, while)
    #[serde(default)]
    pub block_groups: Vec<BlockGroupDefinition>,
}

/// A single step of a workflow template
///
/// `temp_id` is only unique within the owning workflow; real step ids are assigned
/// when the template is materialized into a user workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Workflow-local identifier used to wire edges and group membership
    pub temp_id: String,
    /// Display name
    pub name: String,
    /// Capability handled by the execution engine (e.g., "start", "llm", "condition")
    #[serde(rename = "type")]
    pub step_type: String,
    /// Block group this step belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_group_temp_id: Option<String>,
    /// Step-type specific configuration, never inspected here
    #[serde(default)]
    pub config: Value,
    /// Trigger kind for entry points (e.g., "webhook", "schedule", "manual")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<String>,
    /// Trigger-specific configuration, never inspected here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_config: Option<Value>,
    /// Canvas position
    #[serde(default)]
    pub position: Position,
}

/// Directed connection from a step output to a step or a block group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    /// Step the edge leaves from
    pub source_temp_id: String,
    /// Destination: exactly one step or one block group
    pub target: EdgeTarget,
    /// Output branch of a multi-output step (e.g., "true", "false", a switch case label)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
}

/// Edge destination
///
/// A group target hands control to the composite block as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeTarget {
    Step(String),
    Group(String),
}

/// Composite container whose member steps the execution engine treats specially
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockGroupDefinition {
    /// Workflow-local identifier, shares the namespace with step temp ids
    pub temp_id: String,
    /// Display name
    pub name: String,
    /// Container semantics
    #[serde(rename = "type")]
    pub group_type: BlockGroupType,
    /// Group-specific configuration (iteration source, agent prompt, ...), never inspected here
    #[serde(default)]
    pub config: Value,
    /// Canvas position
    #[serde(default)]
    pub position: Position,
    /// Canvas size
    #[serde(default)]
    pub size: Size,
}

/// Available block group kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockGroupType {
    /// Member steps are exposed to an LLM agent as callable tools
    Agent,
    /// Member steps run concurrently
    Parallel,
    /// Members run guarded, failures route to the catch branch
    TryCatch,
    /// Members run once per item of a collection
    Foreach,
    /// Members repeat while a condition holds
    While,
}

/// Canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Canvas dimensions of a block group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
        }
    }
}

impl WorkflowDefinition {
    /// Create an empty system template
    pub fn new(
        id: Uuid,
        system_slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            system_slug: system_slug.into(),
            name: name.into(),
            description: description.into(),
            version: 1,
            is_system: true,
            steps: Vec::new(),
            edges: Vec::new(),
            block_groups: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_edge(mut self, edge: EdgeDefinition) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_group(mut self, group: BlockGroupDefinition) -> Self {
        self.block_groups.push(group);
        self
    }

    /// Look up a step by temp id
    pub fn step(&self, temp_id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.temp_id == temp_id)
    }

    /// Look up a block group by temp id
    pub fn block_group(&self, temp_id: &str) -> Option<&BlockGroupDefinition> {
        self.block_groups.iter().find(|group| group.temp_id == temp_id)
    }

    /// Steps that can begin execution of the workflow
    pub fn entry_points(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter().filter(|step| step.is_entry_point())
    }

    /// Steps nested inside the given block group, in insertion order
    pub fn group_members<'a>(&'a self, group_temp_id: &'a str) -> impl Iterator<Item = &'a StepDefinition> {
        self.steps
            .iter()
            .filter(move |step| step.block_group_temp_id.as_deref() == Some(group_temp_id))
    }

    /// Edges leaving the given step
    pub fn outgoing_edges<'a>(&'a self, source_temp_id: &'a str) -> impl Iterator<Item = &'a EdgeDefinition> {
        self.edges
            .iter()
            .filter(move |edge| edge.source_temp_id == source_temp_id)
    }
}

impl StepDefinition {
    /// Create a top-level step with empty configuration
    pub fn new(temp_id: impl Into<String>, name: impl Into<String>, step_type: impl Into<String>) -> Self {
        Self {
            temp_id: temp_id.into(),
            name: name.into(),
            step_type: step_type.into(),
            block_group_temp_id: None,
            config: Value::Null,
            trigger_type: None,
            trigger_config: None,
            position: Position::default(),
        }
    }

    /// Nest this step inside a block group
    pub fn in_group(mut self, group_temp_id: impl Into<String>) -> Self {
        self.block_group_temp_id = Some(group_temp_id.into());
        self
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// Attach trigger metadata (only meaningful on entry points)
    pub fn with_trigger(mut self, trigger_type: impl Into<String>, trigger_config: Value) -> Self {
        self.trigger_type = Some(trigger_type.into());
        self.trigger_config = Some(trigger_config);
        self
    }

    /// Place the step on the canvas
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    pub fn is_entry_point(&self) -> bool {
        self.step_type == START_STEP_TYPE
    }
}

impl EdgeDefinition {
    /// Edge to an ordinary step
    pub fn to_step(source_temp_id: impl Into<String>, target_temp_id: impl Into<String>) -> Self {
        Self {
            source_temp_id: source_temp_id.into(),
            target: EdgeTarget::Step(target_temp_id.into()),
            source_port: None,
        }
    }

    /// Edge to the entry boundary of a block group
    pub fn to_group(source_temp_id: impl Into<String>, target_group_temp_id: impl Into<String>) -> Self {
        Self {
            source_temp_id: source_temp_id.into(),
            target: EdgeTarget::Group(target_group_temp_id.into()),
            source_port: None,
        }
    }

    /// Originate the edge from a named output port
    pub fn from_port(mut self, port: impl Into<String>) -> Self {
        self.source_port = Some(port.into());
        self
    }

    pub fn target_temp_id(&self) -> Option<&str> {
        match &self.target {
            EdgeTarget::Step(id) => Some(id),
            EdgeTarget::Group(_) => None,
        }
    }

    pub fn target_group_temp_id(&self) -> Option<&str> {
        match &self.target {
            EdgeTarget::Group(id) => Some(id),
            EdgeTarget::Step(_) => None,
        }
    }
}

impl EdgeTarget {
    /// Temp id of the destination, whichever namespace it lives in
    pub fn temp_id(&self) -> &str {
        match self {
            EdgeTarget::Step(id) | EdgeTarget::Group(id) => id,
        }
    }
}

impl BlockGroupDefinition {
    pub fn new(temp_id: impl Into<String>, name: impl Into<String>, group_type: BlockGroupType) -> Self {
        Self {
            temp_id: temp_id.into(),
            name: name.into(),
            group_type,
            config: Value::Null,
            position: Position::default(),
            size: Size::default(),
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// Place and size the group on the canvas
    pub fn layout(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.position = Position { x, y };
        self.size = Size { width, height };
        self
    }
}
