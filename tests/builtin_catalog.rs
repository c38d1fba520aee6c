//! Catalog-wide properties of the built-in system workflow templates.

use mechaway_catalog::builtins;
use mechaway_catalog::workflow::{
    validate, BlockGroupDefinition, BlockGroupType, DefinitionGraph, EdgeDefinition, RegistryError,
    StepDefinition, StructuralError, SystemWorkflowRegistry, WorkflowDefinition,
};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn every_builtin_validates() {
    for definition in builtins::all() {
        assert_eq!(validate(&definition), Ok(()), "{} is invalid", definition.system_slug);
    }
}

#[test]
fn count_matches_distinct_builtin_slugs() {
    let registry = SystemWorkflowRegistry::builtin();
    let slugs: HashSet<String> = builtins::all().into_iter().map(|wf| wf.system_slug).collect();

    assert_eq!(registry.count(), slugs.len());
    assert_eq!(registry.count(), builtins::all().len());
}

#[test]
fn builtin_ids_are_unique() {
    let ids: HashSet<Uuid> = builtins::all().iter().map(|wf| wf.id).collect();
    assert_eq!(ids.len(), builtins::all().len());
}

#[test]
fn lookup_by_slug_returns_matching_system_template() {
    let registry = SystemWorkflowRegistry::builtin();

    for definition in registry.get_all() {
        let found = registry
            .get_by_slug(&definition.system_slug)
            .expect("registered slug must resolve");
        assert_eq!(found.system_slug, definition.system_slug);
        assert!(found.is_system);
        assert!(!found.steps.is_empty());
        assert!(found.entry_points().next().is_some());
    }
}

#[test]
fn repeated_reads_are_identical() {
    let registry = SystemWorkflowRegistry::builtin();

    assert_eq!(registry.get_all(), registry.get_all());
    for slug in registry.slugs() {
        assert_eq!(registry.get_by_slug(slug), registry.get_by_slug(slug));
    }
    assert!(registry.get_by_slug("does-not-exist").is_none());
}

#[test]
fn builtins_have_no_unreachable_steps_or_edge_cycles() {
    for definition in builtins::all() {
        let graph = DefinitionGraph::build(&definition);
        assert!(
            graph.unreachable_steps().is_empty(),
            "{} has unreachable steps: {:?}",
            definition.system_slug,
            graph.unreachable_steps()
        );
        assert!(!graph.has_cycles(), "{} has edge cycles", definition.system_slug);
    }
}

#[test]
fn builtins_cover_every_block_group_kind() {
    let kinds: HashSet<BlockGroupType> = builtins::all()
        .iter()
        .flat_map(|wf| wf.block_groups.iter().map(|group| group.group_type))
        .collect();

    for kind in [
        BlockGroupType::Agent,
        BlockGroupType::Parallel,
        BlockGroupType::TryCatch,
        BlockGroupType::Foreach,
        BlockGroupType::While,
    ] {
        assert!(kinds.contains(&kind), "no built-in uses {:?}", kind);
    }
}

#[test]
fn registering_a_builtin_twice_is_refused() {
    let mut registry = SystemWorkflowRegistry::builtin();

    let err = registry.try_register(builtins::support_agent()).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateSlug("support-agent".to_string()));
}

#[test]
fn grouped_step_scenario() {
    let workflow = WorkflowDefinition::new(Uuid::new_v4(), "scenario", "Scenario", "grouped step")
        .with_step(StepDefinition::new("step_1", "Start", "start"))
        .with_step(StepDefinition::new("step_2", "Work", "function").in_group("g1"))
        .with_group(BlockGroupDefinition::new("g1", "Group", BlockGroupType::Parallel))
        .with_edge(EdgeDefinition::to_step("step_1", "step_2"));

    assert_eq!(validate(&workflow), Ok(()));
    let members: Vec<&str> = workflow.group_members("g1").map(|s| s.temp_id.as_str()).collect();
    assert_eq!(members, vec!["step_2"]);

    let mut registry = SystemWorkflowRegistry::new();
    registry.try_register(workflow).unwrap();
    assert_eq!(registry.count(), 1);
}

#[test]
fn malformed_template_reports_specific_errors() {
    let workflow = WorkflowDefinition::new(Uuid::new_v4(), "broken", "Broken", "dangling edges")
        .with_step(StepDefinition::new("step_1", "Start", "start"))
        .with_edge(EdgeDefinition::to_step("missing", "step_1"))
        .with_edge(EdgeDefinition::to_step("step_1", "missing"));

    let err = validate(&workflow).unwrap_err();
    assert_eq!(
        err.errors(),
        &[
            StructuralError::InvalidSourceTempId("missing".to_string()),
            StructuralError::InvalidTargetTempId("missing".to_string()),
        ]
    );
    assert_eq!(err.slug(), "broken");
}
