//! codelens - repository scanner
//!
//! Turns the ZIP snapshot of a code repository into a line-counted file
//! tree and a best-effort intra-repository dependency graph built from
//! JavaScript/TypeScript and Python import statements.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod models;
pub mod output;
pub mod parsers;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{ArchiveWalker, ProgressUpdate, Scanner};
pub use error::{handle_error, ErrorSeverity, LimitKind, Result, ResultExt, ScanError};
pub use fetch::{ArchiveSource, GithubZipball, LocalArchive, MemoryArchive};
pub use models::{
    config::Settings,
    dependency_graph::{DependencyEdge, DependencyGraph},
    repo::RepoCoordinates,
    repo_path::RepoPath,
    scan::{ScanLimits, ScanRecord, ScanResult, ScanSummary},
    tree::TreeNode,
};
pub use store::{JsonFileStore, MemoryStore, ScanStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
