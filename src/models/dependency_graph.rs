//! Intra-repository dependency graph

use super::repo_path::RepoPath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caveat shipped with every graph document
pub const GRAPH_NOTE: &str = "Best-effort graph built from import/require/from-import patterns in \
JavaScript/TypeScript and Python sources. Only in-repository targets are resolved; \
duplicate edges are kept as found.";

/// A node in the dependency graph: one per archive entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: RepoPath,
}

/// A directed edge: `source` imports `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: RepoPath,
    pub target: RepoPath,
}

/// Raw adjacency record of a repository.
///
/// Edges are neither deduplicated nor checked for cycles or self references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<DependencyEdge>,
    #[serde(default = "default_note")]
    pub note: String,
}

fn default_note() -> String {
    GRAPH_NOTE.to_string()
}

impl DependencyGraph {
    pub fn new(nodes: Vec<RepoPath>, edges: Vec<DependencyEdge>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|id| GraphNode { id }).collect(),
            edges,
            note: default_note(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Targets imported by `source`, in edge order (duplicates kept)
    pub fn dependencies_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a RepoPath> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source.as_str() == source)
            .map(|e| &e.target)
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        let mut fan_out: HashMap<&RepoPath, usize> = HashMap::new();
        let mut fan_in: HashMap<&RepoPath, usize> = HashMap::new();
        let mut self_edges = 0;

        for edge in &self.edges {
            *fan_out.entry(&edge.source).or_insert(0) += 1;
            *fan_in.entry(&edge.target).or_insert(0) += 1;
            if edge.source == edge.target {
                self_edges += 1;
            }
        }

        // Ties break on path so the result does not depend on map order
        let max_of = |counts: &HashMap<&RepoPath, usize>| {
            counts
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(path, count)| ((*path).clone(), *count))
        };

        let (max_fan_in_file, max_fan_in) = match max_of(&fan_in) {
            Some((path, count)) => (Some(path), count),
            None => (None, 0),
        };
        let (max_fan_out_file, max_fan_out) = match max_of(&fan_out) {
            Some((path, count)) => (Some(path), count),
            None => (None, 0),
        };

        GraphStatistics {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            connected_files: self
                .nodes
                .iter()
                .filter(|n| fan_in.contains_key(&n.id) || fan_out.contains_key(&n.id))
                .count(),
            self_edges,
            max_fan_in,
            max_fan_in_file,
            max_fan_out,
            max_fan_out_file,
        }
    }

    /// Export to DOT format for visualization
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph dependencies {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        for node in &self.nodes {
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\"];\n",
                escape_dot(node.id.as_str()),
                escape_dot(node.id.file_name())
            ));
        }

        dot.push('\n');

        for edge in &self.edges {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                escape_dot(edge.source.as_str()),
                escape_dot(edge.target.as_str())
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub connected_files: usize,
    pub self_edges: usize,
    pub max_fan_in: usize,
    pub max_fan_in_file: Option<RepoPath>,
    pub max_fan_out: usize,
    pub max_fan_out_file: Option<RepoPath>,
}
