//! Collects graph nodes and edges over the course of a scan

use crate::models::dependency_graph::{DependencyEdge, DependencyGraph};
use crate::models::repo_path::RepoPath;
use std::collections::HashSet;

/// Accumulates every archive path as a node and every resolved import as an
/// edge. Edges are kept raw: duplicates and self-edges are preserved in
/// insertion order.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    nodes: Vec<RepoPath>,
    seen: HashSet<RepoPath>,
    edges: Vec<DependencyEdge>,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. Repeated paths keep their first position.
    pub fn add_node(&mut self, path: &RepoPath) {
        if self.seen.insert(path.clone()) {
            self.nodes.push(path.clone());
        }
    }

    pub fn add_edge(&mut self, source: RepoPath, target: RepoPath) {
        self.edges.push(DependencyEdge { source, target });
    }

    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(&RepoPath::normalize(path))
    }

    /// All registered paths, for resolution lookups
    pub fn known_paths(&self) -> &HashSet<RepoPath> {
        &self.seen
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn finish(self) -> DependencyGraph {
        DependencyGraph::new(self.nodes, self.edges)
    }
}
