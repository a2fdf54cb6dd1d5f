//! Artifact graph for transitive scope resolution.
//!
//! This module provides the directed graph of resolved external artifacts and
//! the algorithms the scope resolver needs on it: cycle detection and the
//! transitive closure of a set of root coordinates.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::core::RulegenError;
use crate::models::Dependency;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed graph of artifact coordinates.
///
/// An edge `a -> b` means artifact `a` needs `b` on its classpath.
#[derive(Debug, Default)]
pub struct ArtifactGraph {
    /// The underlying directed graph.
    graph: DiGraph<Dependency, ()>,
    /// Map from coordinates to their graph indices.
    node_map: HashMap<Dependency, NodeIndex>,
}

impl ArtifactGraph {
    /// Create a new empty artifact graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph if it doesn't already exist.
    pub fn ensure_node(&mut self, node: &Dependency) -> NodeIndex {
        if let Some(&index) = self.node_map.get(node) {
            index
        } else {
            let index = self.graph.add_node(node.clone());
            self.node_map.insert(node.clone(), index);
            index
        }
    }

    /// Record that `from` depends on `to`.
    pub fn add_dependency(&mut self, from: &Dependency, to: &Dependency) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Detect cycles using DFS with colors.
    ///
    /// Returns [`RulegenError::ArtifactCycle`] with the cycle path if one exists.
    pub fn detect_cycles(&self) -> Result<(), RulegenError> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|n| (n, Color::White)).collect();
        let mut path: Vec<NodeIndex> = Vec::new();

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White))
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                let chain = cycle
                    .iter()
                    .map(|idx| self.graph[*idx].coordinate())
                    .collect::<Vec<_>>()
                    .join(" → ");
                return Err(RulegenError::ArtifactCycle {
                    chain,
                });
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection; returns the cycle path if one is found.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(neighbor);
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Transitive closure of `roots`, roots included.
    ///
    /// Roots that are not in the graph are still returned so the caller can
    /// report them as unresolved.
    pub fn closure<'a>(
        &self,
        roots: impl IntoIterator<Item = &'a Dependency>,
    ) -> BTreeSet<Dependency> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();

        for root in roots {
            if seen.insert(root.clone())
                && let Some(&idx) = self.node_map.get(root)
            {
                queue.push_back(idx);
            }
        }

        while let Some(current) = queue.pop_front() {
            for neighbor in self.graph.neighbors(current) {
                if seen.insert(self.graph[neighbor].clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        seen
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(name: &str) -> Dependency {
        Dependency::new("g", name, "1")
    }

    #[test]
    fn test_closure_follows_chain() {
        let mut graph = ArtifactGraph::new();
        // a -> b -> c, d isolated
        graph.add_dependency(&dep("a"), &dep("b"));
        graph.add_dependency(&dep("b"), &dep("c"));
        graph.ensure_node(&dep("d"));

        let closure = graph.closure([&dep("a")]);
        assert_eq!(closure, BTreeSet::from([dep("a"), dep("b"), dep("c")]));

        let closure = graph.closure([&dep("c")]);
        assert_eq!(closure, BTreeSet::from([dep("c")]));
    }

    #[test]
    fn test_closure_keeps_unknown_roots() {
        let graph = ArtifactGraph::new();
        let closure = graph.closure([&dep("ghost")]);
        assert_eq!(closure, BTreeSet::from([dep("ghost")]));
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut graph = ArtifactGraph::new();
        graph.add_dependency(&dep("a"), &dep("b"));
        graph.add_dependency(&dep("a"), &dep("b"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = ArtifactGraph::new();
        graph.add_dependency(&dep("a"), &dep("b"));
        graph.add_dependency(&dep("b"), &dep("c"));
        assert!(graph.detect_cycles().is_ok());

        graph.add_dependency(&dep("c"), &dep("a"));
        let err = graph.detect_cycles().unwrap_err();
        match err {
            RulegenError::ArtifactCycle {
                chain,
            } => {
                assert!(chain.contains("g:a:1"));
                assert!(chain.contains("→"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
