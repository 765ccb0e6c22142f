//! Normalized repository-relative paths

use serde::{Deserialize, Serialize};
use std::fmt;

/// A forward-slash separated path relative to the repository root.
///
/// Always normalized: no empty or `.` segments, no leading slash, and `..`
/// never climbs above the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPath(String);

impl RepoPath {
    /// Normalize a raw archive entry name into a repository path.
    ///
    /// Backslashes are treated as separators. A `..` segment pops the previous
    /// segment and is dropped when there is nothing left to pop.
    pub fn normalize(raw: &str) -> Self {
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        RepoPath(segments.join("/"))
    }

    /// Join a relative specifier onto a directory, returning `None` if the
    /// result would climb above the repository root.
    pub fn join_relative(dir: &str, relative: &str) -> Option<Self> {
        let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
        for segment in relative.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop()?;
                }
                other => segments.push(other),
            }
        }
        Some(RepoPath(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Directory portion, `""` for files at the repository root
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Last path segment
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Lowercased extension of the last segment including the dot, if any
    pub fn extension(&self) -> Option<String> {
        extension_of(self.file_name())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

/// Extension of a single path segment, lowercased, including the leading dot.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == name.len() => None,
        Some(idx) => Some(name[idx..].to_ascii_lowercase()),
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RepoPath {
    fn from(raw: &str) -> Self {
        RepoPath::normalize(raw)
    }
}
