//! Module path resolution against the set of files in an archive
//!
//! Resolution never fails loudly: a specifier that does not map to a known
//! repository file (an external package, a typo, a generated file) yields
//! `None` and produces no edge.

use crate::models::repo_path::RepoPath;
use crate::parsers::{Dialect, ImportSpecifier};
use std::collections::HashSet;
use tracing::trace;

/// Extensions appended to a relative JS/TS specifier, in priority order
pub const JS_RESOLVE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".json"];

/// Index files tried when a relative JS/TS specifier names a directory
pub const JS_INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

/// Resolves import specifiers to repository paths
pub struct PathResolver<'a> {
    known: &'a HashSet<RepoPath>,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver over the complete set of repository paths
    pub fn new(known: &'a HashSet<RepoPath>) -> Self {
        Self { known }
    }

    /// Resolve an extracted specifier using its dialect's rules
    pub fn resolve(&self, spec: &ImportSpecifier) -> Option<RepoPath> {
        let resolved = match spec.dialect {
            Dialect::JavaScript => self.resolve_js(&spec.from, &spec.raw),
            Dialect::Python => self.resolve_python(&spec.from, &spec.raw),
        };
        if resolved.is_none() {
            trace!(from = %spec.from, specifier = %spec.raw, "unresolved import");
        }
        resolved
    }

    /// Resolve a JS/TS specifier. Only relative specifiers are attempted.
    pub fn resolve_js(&self, from: &RepoPath, specifier: &str) -> Option<RepoPath> {
        if !specifier.starts_with('.') {
            return None;
        }

        let base = RepoPath::join_relative(from.parent(), specifier)?;

        // Exact path first
        if !base.is_empty() && self.known.contains(&base) {
            return Some(base);
        }

        // Then with extensions
        if !base.is_empty() {
            for ext in JS_RESOLVE_EXTENSIONS {
                let candidate = RepoPath::normalize(&format!("{}{}", base, ext));
                if self.known.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        // Directory with an index file
        if base.extension().is_none() {
            for index in JS_INDEX_FILES {
                let candidate = child(&base, index);
                if self.known.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        None
    }

    /// Resolve a Python module specifier.
    ///
    /// Leading dots are relative: one dot is the containing file's package,
    /// each extra dot ascends one directory. Anything else is joined from the
    /// repository root.
    pub fn resolve_python(&self, from: &RepoPath, specifier: &str) -> Option<RepoPath> {
        let dots = specifier.chars().take_while(|c| *c == '.').count();
        let remainder = &specifier[dots..];

        let mut base: Vec<&str> = if dots > 0 {
            let mut dir: Vec<&str> = from.parent().split('/').filter(|s| !s.is_empty()).collect();
            for _ in 1..dots {
                dir.pop()?;
            }
            dir
        } else {
            Vec::new()
        };
        base.extend(remainder.split('.').filter(|s| !s.is_empty()));

        let module = RepoPath::normalize(&base.join("/"));

        if !module.is_empty() {
            let candidate = RepoPath::normalize(&format!("{}.py", module));
            if self.known.contains(&candidate) {
                return Some(candidate);
            }
        }

        let candidate = child(&module, "__init__.py");
        if self.known.contains(&candidate) {
            return Some(candidate);
        }

        None
    }
}

fn child(dir: &RepoPath, name: &str) -> RepoPath {
    if dir.is_empty() {
        RepoPath::normalize(name)
    } else {
        RepoPath::normalize(&format!("{}/{}", dir, name))
    }
}
