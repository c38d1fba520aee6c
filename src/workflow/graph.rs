/// Petgraph view of a workflow template
///
/// Builds a directed graph over steps and block groups so the execution engine and
/// the registry can ask flow questions (successors per output port, reachability from
/// entry points, cycles). Group membership is not a flow edge: entering a group
/// reaches all of its member steps.

use crate::workflow::types::{EdgeTarget, WorkflowDefinition};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet, VecDeque};

/// Graph node: a step or a block group, by temp id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowNode {
    Step(String),
    Group(String),
}

impl FlowNode {
    pub fn temp_id(&self) -> &str {
        match self {
            FlowNode::Step(id) | FlowNode::Group(id) => id,
        }
    }
}

/// Directed flow graph of one workflow template
///
/// Intended for definitions that passed validation. Dangling references are skipped
/// rather than reported; duplicate temp ids resolve to their first occurrence.
#[derive(Debug)]
pub struct DefinitionGraph {
    /// Edge weight is the source port, if any
    graph: DiGraph<FlowNode, Option<String>>,
    /// Mapping from step temp id to graph node index
    step_index: HashMap<String, NodeIndex>,
    /// Mapping from group temp id to graph node index
    group_index: HashMap<String, NodeIndex>,
    /// Member step indices per group node
    members: HashMap<NodeIndex, Vec<NodeIndex>>,
    /// Entry point step indices
    entry_points: Vec<NodeIndex>,
}

impl DefinitionGraph {
    /// Build the flow graph for a workflow template
    pub fn build(workflow: &WorkflowDefinition) -> Self {
        tracing::debug!("🏗️ Building flow graph for '{}'", workflow.system_slug);

        let mut graph = DiGraph::new();
        let mut step_index = HashMap::new();
        let mut group_index = HashMap::new();

        for step in &workflow.steps {
            if !step_index.contains_key(&step.temp_id) {
                let index = graph.add_node(FlowNode::Step(step.temp_id.clone()));
                step_index.insert(step.temp_id.clone(), index);
            }
        }

        for group in &workflow.block_groups {
            if !group_index.contains_key(&group.temp_id) {
                let index = graph.add_node(FlowNode::Group(group.temp_id.clone()));
                group_index.insert(group.temp_id.clone(), index);
            }
        }

        for edge in &workflow.edges {
            let Some(&from) = step_index.get(&edge.source_temp_id) else {
                continue;
            };
            let to = match &edge.target {
                EdgeTarget::Step(id) => step_index.get(id),
                EdgeTarget::Group(id) => group_index.get(id),
            };
            if let Some(&to) = to {
                graph.add_edge(from, to, edge.source_port.clone());
            }
        }

        let mut members: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
        for step in &workflow.steps {
            let Some(group_id) = &step.block_group_temp_id else {
                continue;
            };
            if let (Some(&group), Some(&member)) = (group_index.get(group_id), step_index.get(&step.temp_id)) {
                members.entry(group).or_default().push(member);
            }
        }

        let entry_points = workflow
            .entry_points()
            .filter_map(|step| step_index.get(&step.temp_id).copied())
            .collect();

        Self {
            graph,
            step_index,
            group_index,
            members,
            entry_points,
        }
    }

    /// Destinations of edges leaving a step, in edge insertion order
    ///
    /// With `port` set, only edges originating from that output port are followed.
    pub fn successors(&self, temp_id: &str, port: Option<&str>) -> Vec<&FlowNode> {
        let Some(&index) = self.step_index.get(temp_id) else {
            return Vec::new();
        };

        let mut targets: Vec<&FlowNode> = self
            .graph
            .edges(index)
            .filter(|edge| port.is_none() || edge.weight().as_deref() == port)
            .map(|edge| &self.graph[edge.target()])
            .collect();
        // petgraph yields outgoing edges newest first
        targets.reverse();
        targets
    }

    /// Steps that no entry point can reach, in graph order
    pub fn unreachable_steps(&self) -> Vec<&str> {
        let reachable = self.reachable_from_entry_points();

        self.graph
            .node_indices()
            .filter(|index| !reachable.contains(index))
            .filter_map(|index| match &self.graph[index] {
                FlowNode::Step(id) => Some(id.as_str()),
                FlowNode::Group(_) => None,
            })
            .collect()
    }

    /// Whether control can loop back through edges
    ///
    /// Iteration belongs to foreach/while groups, so an edge cycle usually means a wiring mistake.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    pub fn contains_group(&self, temp_id: &str) -> bool {
        self.group_index.contains_key(temp_id)
    }

    fn reachable_from_entry_points(&self) -> HashSet<NodeIndex> {
        let mut reachable = HashSet::new();
        let mut queue = VecDeque::new();

        for &entry in &self.entry_points {
            if reachable.insert(entry) {
                queue.push_back(entry);
            }
        }

        while let Some(current) = queue.pop_front() {
            let members = self.members.get(&current).into_iter().flatten().copied();
            for next in self.graph.neighbors(current).chain(members) {
                if reachable.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        reachable
    }
}
