//! Sources of repository archive bytes
//!
//! An [`ArchiveSource`] turns repository coordinates into the bytes of a ZIP
//! snapshot. Failures are fatal to the scan that asked; nothing here retries.

pub mod github;
pub mod local;

pub use github::GithubZipball;
pub use local::{LocalArchive, MemoryArchive};

use crate::error::Result;
use crate::models::repo::RepoCoordinates;

/// Supplier of archive bytes for a repository
pub trait ArchiveSource: Send + Sync {
    /// Fetch the archive for `coords`, reading at most `max_bytes` bytes
    fn fetch(&self, coords: &RepoCoordinates, max_bytes: u64) -> Result<Vec<u8>>;

    /// Short human-readable name of where archives come from
    fn describe(&self) -> String;
}
