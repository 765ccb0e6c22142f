//! Scan summaries, results and stored records

use super::dependency_graph::DependencyGraph;
use super::repo::RepoCoordinates;
use super::tree::TreeNode;
use serde::{Deserialize, Serialize};

/// Default ceiling on decompressed bytes read from an archive (100 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;

/// Default ceiling on non-directory archive entries
pub const DEFAULT_MAX_FILES: usize = 5000;

/// Files larger than this are counted but never parsed for imports (2 MiB)
pub const DEFAULT_MAX_PARSE_BYTES: u64 = 2 * 1024 * 1024;

/// Ceilings applied to one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLimits {
    pub max_bytes: u64,
    pub max_files: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// Metadata about a completed scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub scan_id: String,
    pub owner: String,
    pub repo: String,
    pub repo_url: String,
    /// Unix seconds
    pub created_at: i64,
    /// Non-directory archive entries
    pub files_scanned: usize,
    #[serde(default)]
    pub text_files: usize,
    #[serde(default)]
    pub parsed_files: usize,
    pub total_loc: u64,
    #[serde(default)]
    pub edge_count: usize,
    pub limits: ScanLimits,
}

impl ScanSummary {
    pub fn coordinates(&self) -> RepoCoordinates {
        RepoCoordinates::new(self.owner.clone(), self.repo.clone())
    }
}

/// The three-part product of a successful scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub summary: ScanSummary,
    pub tree: TreeNode,
    pub graph: DependencyGraph,
}

/// A scan as persisted by a [`crate::store::ScanStore`].
///
/// `graph` is `None` for records written before graphs were produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub summary: ScanSummary,
    pub tree: TreeNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<DependencyGraph>,
}

impl ScanRecord {
    pub fn scan_id(&self) -> &str {
        &self.summary.scan_id
    }
}

impl From<ScanResult> for ScanRecord {
    fn from(result: ScanResult) -> Self {
        Self {
            summary: result.summary,
            tree: result.tree,
            graph: Some(result.graph),
        }
    }
}
