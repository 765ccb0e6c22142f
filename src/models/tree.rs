//! Frozen file tree output form

use serde::{Deserialize, Serialize};

/// Name of the tree's root node. Never collides with repository entries,
/// which are always nested beneath it.
pub const ROOT_NAME: &str = "root";

/// A node of the finalized line-count tree.
///
/// Files carry only their own `loc`. Directories carry `children`, sorted by
/// name, and a `loc` equal to the sum of their children's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub loc: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(name: impl Into<String>, loc: u64) -> Self {
        Self {
            name: name.into(),
            loc,
            children: Vec::new(),
        }
    }

    /// An empty root, as produced by an archive without text files
    pub fn empty_root() -> Self {
        Self::file(ROOT_NAME, 0)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Walk down by `/`-separated path segments
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Every leaf below this node as `(path, loc)`, in tree order.
    ///
    /// Paths are relative to this node and exclude its own name.
    pub fn leaves(&self) -> Vec<(String, u64)> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_leaves("", &mut out);
        }
        out
    }

    fn collect_leaves(&self, prefix: &str, out: &mut Vec<(String, u64)>) {
        let path = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", prefix, self.name)
        };
        if self.is_leaf() {
            out.push((path, self.loc));
        } else {
            for child in &self.children {
                child.collect_leaves(&path, out);
            }
        }
    }

    /// Sum of leaf line counts
    pub fn leaf_loc_total(&self) -> u64 {
        if self.is_leaf() {
            self.loc
        } else {
            self.children.iter().map(TreeNode::leaf_loc_total).sum()
        }
    }

    /// Whether every directory's `loc` equals the sum of its children's and
    /// children are sorted by name.
    pub fn is_consistent(&self) -> bool {
        if self.is_leaf() {
            return true;
        }
        let sum: u64 = self.children.iter().map(|c| c.loc).sum();
        let sorted = self.children.windows(2).all(|w| w[0].name < w[1].name);
        sum == self.loc && sorted && self.children.iter().all(TreeNode::is_consistent)
    }

    /// Number of leaves below this node
    pub fn file_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(TreeNode::file_count).sum()
        }
    }
}
