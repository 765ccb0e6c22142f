//! Incremental construction of the line-count tree
//!
//! Directories live in a flat arena keyed by their repository path, so
//! inserting into a deep tree never recurses. Only [`TreeBuilder::finalize`]
//! walks the structure, producing the frozen [`TreeNode`] form.

use crate::models::repo_path::RepoPath;
use crate::models::tree::{TreeNode, ROOT_NAME};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    File(u64),
    Dir,
}

#[derive(Debug, Default)]
struct DirRecord {
    children: BTreeMap<String, Slot>,
}

/// Accumulates `(path, loc)` pairs into a directory tree
#[derive(Debug)]
pub struct TreeBuilder {
    dirs: HashMap<String, DirRecord>,
    files: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(String::new(), DirRecord::default());
        Self { dirs, files: 0 }
    }

    /// Number of file leaves currently held
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// Record a file's line count, creating intermediate directories.
    ///
    /// Re-inserting a path replaces its count. A directory always wins over a
    /// file of the same name: the file leaf is replaced when a nested path
    /// arrives, and a file arriving where a directory exists is dropped.
    pub fn insert(&mut self, path: &RepoPath, loc: u64) {
        let segments: Vec<&str> = path.segments().collect();
        let Some((file_name, dir_segments)) = segments.split_last() else {
            return;
        };

        let mut dir = String::new();
        for segment in dir_segments {
            let child = if dir.is_empty() {
                segment.to_string()
            } else {
                format!("{}/{}", dir, segment)
            };
            self.ensure_dir(&dir, segment, &child);
            dir = child;
        }

        let Some(record) = self.dirs.get_mut(&dir) else {
            return;
        };
        match record.children.get(*file_name).copied() {
            Some(Slot::Dir) => {
                debug!(path = %path, "file shadows a directory; keeping the directory");
            }
            Some(Slot::File(_)) => {
                record.children.insert(file_name.to_string(), Slot::File(loc));
            }
            None => {
                record.children.insert(file_name.to_string(), Slot::File(loc));
                self.files += 1;
            }
        }
    }

    fn ensure_dir(&mut self, parent: &str, name: &str, path: &str) {
        if let Some(record) = self.dirs.get_mut(parent) {
            if let Some(Slot::File(_)) = record.children.insert(name.to_string(), Slot::Dir) {
                debug!(path = %path, "directory replaces a file leaf");
                self.files -= 1;
            }
        }
        self.dirs.entry(path.to_string()).or_default();
    }

    /// Freeze into the output form: children sorted by name, directory line
    /// counts summed bottom-up, root named [`ROOT_NAME`].
    pub fn finalize(self) -> TreeNode {
        self.freeze("", ROOT_NAME)
    }

    fn freeze(&self, dir: &str, name: &str) -> TreeNode {
        let children: Vec<TreeNode> = self
            .dirs
            .get(dir)
            .map(|record| {
                record
                    .children
                    .iter()
                    .map(|(child, slot)| match slot {
                        Slot::File(loc) => TreeNode::file(child.as_str(), *loc),
                        Slot::Dir => {
                            let path = if dir.is_empty() {
                                child.clone()
                            } else {
                                format!("{}/{}", dir, child)
                            };
                            self.freeze(&path, child)
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        TreeNode {
            name: name.to_string(),
            loc: children.iter().map(|c| c.loc).sum(),
            children,
        }
    }
}
