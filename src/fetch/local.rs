//! Archive sources that never touch the network

use super::ArchiveSource;
use crate::error::{LimitKind, Result, ScanError};
use crate::models::repo::RepoCoordinates;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A ZIP file on disk, handed out whatever coordinates are requested
#[derive(Debug, Clone)]
pub struct LocalArchive {
    path: PathBuf,
}

impl LocalArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArchiveSource for LocalArchive {
    fn fetch(&self, _coords: &RepoCoordinates, max_bytes: u64) -> Result<Vec<u8>> {
        let url = self.path.display().to_string();
        let metadata = fs::metadata(&self.path).map_err(|e| ScanError::fetch_error(&url, e.to_string()))?;
        if metadata.len() > max_bytes {
            return Err(ScanError::limit_exceeded(
                LimitKind::Bytes,
                max_bytes,
                metadata.len(),
            ));
        }

        debug!(path = %url, bytes = metadata.len(), "reading local archive");
        fs::read(&self.path).map_err(|e| ScanError::fetch_error(url, e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory archives keyed by repository
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    archives: HashMap<RepoCoordinates, Arc<Vec<u8>>>,
    fallback: Option<Arc<Vec<u8>>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source answering every request with the same bytes
    pub fn single(bytes: Vec<u8>) -> Self {
        Self {
            archives: HashMap::new(),
            fallback: Some(Arc::new(bytes)),
        }
    }

    pub fn with_archive(mut self, coords: RepoCoordinates, bytes: Vec<u8>) -> Self {
        self.archives.insert(coords, Arc::new(bytes));
        self
    }
}

impl ArchiveSource for MemoryArchive {
    fn fetch(&self, coords: &RepoCoordinates, max_bytes: u64) -> Result<Vec<u8>> {
        let bytes = self
            .archives
            .get(coords)
            .or(self.fallback.as_ref())
            .ok_or_else(|| ScanError::fetch_error(coords.canonical_url(), "no archive registered"))?;

        if bytes.len() as u64 > max_bytes {
            return Err(ScanError::limit_exceeded(
                LimitKind::Bytes,
                max_bytes,
                bytes.len() as u64,
            ));
        }
        Ok(bytes.as_ref().clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
