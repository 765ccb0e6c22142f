//! Archive traversal with resource ceilings
//!
//! [`ArchiveWalker`] yields every non-directory entry of a ZIP archive as a
//! normalized [`RepoPath`] plus its decompressed content.
//!
//! # Invariants
//! - At most `max_files` entries are yielded; the next one fails the walk.
//! - At most `max_bytes` decompressed bytes are read in total. A single entry
//!   is never decompressed further than one byte past the remaining budget.
//! - After an error the walker is exhausted.

use crate::error::{LimitKind, Result, ScanError};
use crate::models::repo_path::RepoPath;
use crate::models::scan::ScanLimits;
use std::io::{Cursor, Read, Seek};
use tracing::{debug, warn};
use zip::ZipArchive;

/// One file extracted from the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: RepoPath,
    pub content: Vec<u8>,
}

/// Streaming walker over the entries of a ZIP archive
pub struct ArchiveWalker<R: Read + Seek> {
    archive: ZipArchive<R>,
    limits: ScanLimits,
    prefix: Option<String>,
    next_index: usize,
    files_seen: usize,
    bytes_read: u64,
    finished: bool,
}

impl<'a> ArchiveWalker<Cursor<&'a [u8]>> {
    /// Open an in-memory archive
    pub fn from_bytes(bytes: &'a [u8], limits: ScanLimits) -> Result<Self> {
        Self::new(Cursor::new(bytes), limits)
    }
}

impl<R: Read + Seek> ArchiveWalker<R> {
    /// Open an archive, reading its central directory
    pub fn new(reader: R, limits: ScanLimits) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        let prefix = synthetic_root(archive.file_names());
        if let Some(prefix) = &prefix {
            debug!(prefix = %prefix, "stripping synthetic top-level directory");
        }

        Ok(Self {
            archive,
            limits,
            prefix,
            next_index: 0,
            files_seen: 0,
            bytes_read: 0,
            finished: false,
        })
    }

    /// Number of records (files and directories) in the central directory
    pub fn record_count(&self) -> usize {
        self.archive.len()
    }

    /// Index of the next record to be visited
    pub fn position(&self) -> usize {
        self.next_index
    }

    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// The top-level directory being stripped from entry names, if any
    pub fn stripped_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Advance to the next file entry.
    ///
    /// Returns `Ok(None)` once the archive is exhausted.
    pub fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        if self.finished {
            return Ok(None);
        }
        match self.advance() {
            Ok(Some(entry)) => Ok(Some(entry)),
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }

    fn advance(&mut self) -> Result<Option<ArchiveEntry>> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;

            let mut file = self.archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }

            self.files_seen += 1;
            if self.files_seen > self.limits.max_files {
                warn!(
                    max_files = self.limits.max_files,
                    "archive entry limit exceeded"
                );
                return Err(ScanError::limit_exceeded(
                    LimitKind::Files,
                    self.limits.max_files as u64,
                    self.files_seen as u64,
                ));
            }

            let raw_name = file.name().to_string();
            let path = strip_prefix(&raw_name, self.prefix.as_deref());
            if path.is_empty() {
                debug!(name = %raw_name, "skipping entry with empty path");
                continue;
            }

            let remaining = self.limits.max_bytes.saturating_sub(self.bytes_read);
            let capacity = file.size().min(remaining.saturating_add(1)).min(1 << 20) as usize;
            let mut content = Vec::with_capacity(capacity);
            (&mut file)
                .take(remaining.saturating_add(1))
                .read_to_end(&mut content)
                .map_err(|e| ScanError::archive_error(format!("{}: {}", raw_name, e)))?;

            let observed = self.bytes_read.saturating_add(content.len() as u64);
            if observed > self.limits.max_bytes {
                warn!(
                    max_bytes = self.limits.max_bytes,
                    entry = %raw_name,
                    "archive byte limit exceeded"
                );
                return Err(ScanError::limit_exceeded(
                    LimitKind::Bytes,
                    self.limits.max_bytes,
                    observed,
                ));
            }
            self.bytes_read = observed;

            return Ok(Some(ArchiveEntry { path, content }));
        }
        Ok(None)
    }
}

impl<R: Read + Seek> Iterator for ArchiveWalker<R> {
    type Item = Result<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// Find the single top-level directory every entry lives under.
///
/// Code-hosting zipballs wrap the repository in one `<owner>-<repo>-<sha>/`
/// folder. Returns `None` when any file sits at the archive root, when
/// entries disagree on their first segment, or when there are no files.
pub fn synthetic_root<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut root: Option<String> = None;
    let mut saw_file = false;

    for name in names {
        let is_dir = name.ends_with('/') || name.ends_with('\\');
        let normalized = RepoPath::normalize(name);
        if normalized.is_empty() {
            continue;
        }

        let mut segments = normalized.segments();
        let first = segments.next()?;
        let nested = segments.next().is_some();

        if !is_dir {
            if !nested {
                return None;
            }
            saw_file = true;
        }

        match &root {
            Some(existing) if existing != first => return None,
            Some(_) => {}
            None => root = Some(first.to_string()),
        }
    }

    if saw_file {
        root
    } else {
        None
    }
}

fn strip_prefix(raw_name: &str, prefix: Option<&str>) -> RepoPath {
    let normalized = RepoPath::normalize(raw_name);
    match prefix {
        Some(prefix) => {
            let rest = normalized
                .as_str()
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or("");
            RepoPath::normalize(rest)
        }
        None => normalized,
    }
}
