//! Persistence of completed scans
//!
//! The scanner only ever talks to a [`ScanStore`]. A record is created when
//! a scan succeeds, read back on lookup, and absent otherwise. Failed scans
//! never reach the store.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::{Result, ScanError};
use crate::models::dependency_graph::DependencyGraph;
use crate::models::scan::{ScanRecord, ScanSummary};
use tracing::warn;

/// Key-value store of scan records, keyed by scan id
pub trait ScanStore: Send + Sync {
    /// Persist a record, replacing any record with the same id
    fn save(&self, record: &ScanRecord) -> Result<()>;

    /// Load a record, failing with [`ScanError::NotFound`] if absent
    fn load(&self, scan_id: &str) -> Result<ScanRecord>;

    fn exists(&self, scan_id: &str) -> bool;

    /// Ids of all stored scans, sorted
    fn list(&self) -> Result<Vec<String>>;

    /// Summaries of all stored scans, oldest first. Unreadable records are
    /// skipped.
    fn list_summaries(&self) -> Result<Vec<ScanSummary>> {
        let mut summaries = Vec::new();
        for id in self.list()? {
            match self.load(&id) {
                Ok(record) => summaries.push(record.summary),
                Err(err) => warn!(scan_id = %id, error = %err, "skipping unreadable scan record"),
            }
        }
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.scan_id.cmp(&b.scan_id))
        });
        Ok(summaries)
    }
}

/// Load only the dependency graph of a stored scan.
///
/// Records written before graphs existed yield
/// [`ScanError::GraphUnavailable`] rather than [`ScanError::NotFound`].
pub fn load_graph(store: &dyn ScanStore, scan_id: &str) -> Result<DependencyGraph> {
    let record = store.load(scan_id)?;
    record.graph.ok_or_else(|| ScanError::GraphUnavailable {
        scan_id: scan_id.to_string(),
    })
}

/// Whether `scan_id` is safe to use as a storage key: ASCII alphanumerics and
/// dashes only, at most 64 characters.
pub fn is_valid_scan_id(scan_id: &str) -> bool {
    !scan_id.is_empty()
        && scan_id.len() <= 64
        && scan_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
