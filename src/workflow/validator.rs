/// Structural validation of workflow templates
///
/// Checks referential integrity of the step graph only: required fields, unique
/// temp ids, at least one entry point, and that every edge endpoint and group
/// reference resolves. Step configuration is never looked at.

use crate::workflow::types::{EdgeTarget, WorkflowDefinition};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A single structural violation, identified by workflow-local ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("system slug is required")]
    MissingSlug,

    #[error("workflow name is required")]
    MissingName,

    #[error("workflow has no steps")]
    NoSteps,

    #[error("duplicate temp id: {0}")]
    DuplicateTempId(String),

    #[error("workflow has no start step")]
    NoStartStep,

    #[error("edge source does not resolve to a step: {0}")]
    InvalidSourceTempId(String),

    #[error("edge target does not resolve to a step or block group: {0}")]
    InvalidTargetTempId(String),

    #[error("step '{step_name}' references unknown block group: {group_id}")]
    InvalidBlockGroupReference { step_name: String, group_id: String },
}

/// Every structural violation found in one workflow, in check order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    slug: String,
    errors: Vec<StructuralError>,
}

impl ValidationErrors {
    /// Slug of the workflow that failed (may be empty)
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn errors(&self) -> &[StructuralError] {
        &self.errors
    }

    pub fn into_inner(self) -> Vec<StructuralError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = if self.slug.is_empty() { "<no slug>" } else { &self.slug };
        write!(f, "workflow '{}' is structurally invalid: ", slug)?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a workflow template, collecting every violation
///
/// Never panics on well-typed input. Step and block group temp ids share one
/// namespace, so a group id colliding with a step id is a duplicate.
pub fn validate(workflow: &WorkflowDefinition) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if workflow.system_slug.trim().is_empty() {
        errors.push(StructuralError::MissingSlug);
    }

    if workflow.name.trim().is_empty() {
        errors.push(StructuralError::MissingName);
    }

    if workflow.steps.is_empty() {
        errors.push(StructuralError::NoSteps);
    }

    // Temp id namespace (steps first, then groups)
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let ids = workflow
        .steps
        .iter()
        .map(|step| step.temp_id.as_str())
        .chain(workflow.block_groups.iter().map(|group| group.temp_id.as_str()));
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            errors.push(StructuralError::DuplicateTempId(id.to_string()));
        }
    }

    if !workflow.steps.is_empty() && workflow.entry_points().next().is_none() {
        errors.push(StructuralError::NoStartStep);
    }

    let step_ids: HashSet<&str> = workflow.steps.iter().map(|s| s.temp_id.as_str()).collect();
    let group_ids: HashSet<&str> = workflow.block_groups.iter().map(|g| g.temp_id.as_str()).collect();

    for edge in &workflow.edges {
        if !step_ids.contains(edge.source_temp_id.as_str()) {
            errors.push(StructuralError::InvalidSourceTempId(edge.source_temp_id.clone()));
        }
    }

    for edge in &workflow.edges {
        let resolves = match &edge.target {
            EdgeTarget::Step(id) => step_ids.contains(id.as_str()),
            EdgeTarget::Group(id) => group_ids.contains(id.as_str()),
        };
        if !resolves {
            errors.push(StructuralError::InvalidTargetTempId(edge.target.temp_id().to_string()));
        }
    }

    for step in &workflow.steps {
        if let Some(group_id) = &step.block_group_temp_id {
            if !group_ids.contains(group_id.as_str()) {
                errors.push(StructuralError::InvalidBlockGroupReference {
                    step_name: step.name.clone(),
                    group_id: group_id.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors {
            slug: workflow.system_slug.clone(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::types::{
        BlockGroupDefinition, BlockGroupType, EdgeDefinition, StepDefinition, START_STEP_TYPE,
    };
    use uuid::Uuid;

    fn workflow() -> WorkflowDefinition {
        WorkflowDefinition::new(Uuid::new_v4(), "test-flow", "Test Flow", "fixture")
            .with_step(StepDefinition::new("step_1", "Start", START_STEP_TYPE))
            .with_step(StepDefinition::new("step_2", "Work", "function"))
            .with_edge(EdgeDefinition::to_step("step_1", "step_2"))
    }

    fn errors_of(workflow: &WorkflowDefinition) -> Vec<StructuralError> {
        validate(workflow).unwrap_err().into_inner()
    }

    #[test]
    fn valid_workflow_passes() {
        assert_eq!(validate(&workflow()), Ok(()));
    }

    #[test]
    fn missing_slug() {
        let mut wf = workflow();
        wf.system_slug = String::new();
        assert_eq!(errors_of(&wf), vec![StructuralError::MissingSlug]);
    }

    #[test]
    fn missing_name() {
        let mut wf = workflow();
        wf.name = "  ".to_string();
        assert_eq!(errors_of(&wf), vec![StructuralError::MissingName]);
    }

    #[test]
    fn no_steps_does_not_also_report_no_start() {
        let mut wf = workflow();
        wf.steps.clear();
        wf.edges.clear();
        assert_eq!(errors_of(&wf), vec![StructuralError::NoSteps]);
    }

    #[test]
    fn function_only_workflow_has_no_start() {
        let wf = WorkflowDefinition::new(Uuid::new_v4(), "fn-only", "Fn Only", "")
            .with_step(StepDefinition::new("step_1", "Work", "function"));
        assert_eq!(errors_of(&wf), vec![StructuralError::NoStartStep]);
    }

    #[test]
    fn duplicate_step_temp_id_reported_once() {
        let wf = workflow()
            .with_step(StepDefinition::new("step_1", "Again", "function"))
            .with_step(StepDefinition::new("step_1", "Thrice", "function"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::DuplicateTempId("step_1".to_string())]
        );
    }

    #[test]
    fn group_id_colliding_with_step_id_is_duplicate() {
        let wf = workflow().with_group(BlockGroupDefinition::new("step_2", "Loop", BlockGroupType::While));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::DuplicateTempId("step_2".to_string())]
        );
    }

    #[test]
    fn dangling_edge_source() {
        let wf = workflow().with_edge(EdgeDefinition::to_step("missing", "step_2"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::InvalidSourceTempId("missing".to_string())]
        );
    }

    #[test]
    fn dangling_edge_target() {
        let wf = workflow().with_edge(EdgeDefinition::to_step("step_1", "missing"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::InvalidTargetTempId("missing".to_string())]
        );
    }

    #[test]
    fn dangling_group_target() {
        let wf = workflow().with_edge(EdgeDefinition::to_group("step_1", "missing"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::InvalidTargetTempId("missing".to_string())]
        );
    }

    #[test]
    fn group_target_does_not_resolve_against_steps() {
        let wf = workflow().with_edge(EdgeDefinition::to_group("step_1", "step_1"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::InvalidTargetTempId("step_1".to_string())]
        );
    }

    #[test]
    fn repeated_group_id_is_duplicate() {
        let wf = workflow()
            .with_group(BlockGroupDefinition::new("g", "First", BlockGroupType::Parallel))
            .with_group(BlockGroupDefinition::new("g", "Second", BlockGroupType::Foreach));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::DuplicateTempId("g".to_string())]
        );
    }

    #[test]
    fn step_target_does_not_resolve_against_groups() {
        let wf = workflow()
            .with_group(BlockGroupDefinition::new("g1", "Fan out", BlockGroupType::Parallel))
            .with_edge(EdgeDefinition::to_step("step_1", "g1"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::InvalidTargetTempId("g1".to_string())]
        );
    }

    #[test]
    fn group_target_resolves() {
        let wf = workflow()
            .with_group(BlockGroupDefinition::new("g1", "Fan out", BlockGroupType::Parallel))
            .with_step(StepDefinition::new("step_3", "Branch", "function").in_group("g1"))
            .with_edge(EdgeDefinition::to_group("step_2", "g1"));
        assert_eq!(validate(&wf), Ok(()));
    }

    #[test]
    fn unknown_block_group_reference() {
        let wf = workflow().with_step(StepDefinition::new("step_3", "Orphan", "function").in_group("g9"));
        assert_eq!(
            errors_of(&wf),
            vec![StructuralError::InvalidBlockGroupReference {
                step_name: "Orphan".to_string(),
                group_id: "g9".to_string(),
            }]
        );
    }

    #[test]
    fn all_violations_are_accumulated_in_check_order() {
        let wf = WorkflowDefinition::new(Uuid::new_v4(), "", "", "")
            .with_step(StepDefinition::new("a", "A", "function"))
            .with_step(StepDefinition::new("a", "B", "function").in_group("nope"))
            .with_edge(EdgeDefinition::to_step("ghost", "phantom"));

        let err = validate(&wf).unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                StructuralError::MissingSlug,
                StructuralError::MissingName,
                StructuralError::DuplicateTempId("a".to_string()),
                StructuralError::NoStartStep,
                StructuralError::InvalidSourceTempId("ghost".to_string()),
                StructuralError::InvalidTargetTempId("phantom".to_string()),
                StructuralError::InvalidBlockGroupReference {
                    step_name: "B".to_string(),
                    group_id: "nope".to_string(),
                },
            ]
        );
        assert!(err.to_string().starts_with("workflow '<no slug>' is structurally invalid: "));
    }

    #[test]
    fn grouped_step_scenario_validates_and_reports_membership() {
        let wf = WorkflowDefinition::new(Uuid::new_v4(), "grouped", "Grouped", "")
            .with_step(StepDefinition::new("step_1", "Start", "start"))
            .with_step(StepDefinition::new("step_2", "Work", "function").in_group("g1"))
            .with_group(BlockGroupDefinition::new("g1", "Group", BlockGroupType::Agent))
            .with_edge(EdgeDefinition::to_step("step_1", "step_2"));

        assert_eq!(validate(&wf), Ok(()));
        let members: Vec<&str> = wf.group_members("g1").map(|s| s.temp_id.as_str()).collect();
        assert_eq!(members, vec!["step_2"]);
    }
}
