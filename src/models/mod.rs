//! Data models and structures for codelens

pub mod config;
pub mod dependency_graph;
pub mod repo;
pub mod repo_path;
pub mod scan;
pub mod tree;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyEdge, DependencyGraph, GraphNode, GraphStatistics};
pub use repo::RepoCoordinates;
pub use repo_path::RepoPath;
pub use scan::{ScanLimits, ScanRecord, ScanResult, ScanSummary};
pub use tree::TreeNode;
