//! Import extraction for the supported source dialects
//!
//! Each dialect is an isolated set of pattern-matching functions. Nothing
//! here knows about resolution or graph assembly; swapping an extractor for
//! a grammar-aware one only touches its own module.

pub mod javascript;
pub mod python;

pub use javascript::JsImportExtractor;
pub use python::PythonImportExtractor;

use crate::models::repo_path::RepoPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extensions parsed with the JS/TS dialect
pub const JS_EXTENSIONS: &[&str] = &[".js", ".jsx", ".mjs", ".cjs", ".ts", ".tsx"];

/// Extensions parsed with the Python dialect
pub const PYTHON_EXTENSIONS: &[&str] = &[".py"];

/// Language-specific extraction and resolution rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    JavaScript,
    Python,
}

impl Dialect {
    /// Dialect for a file, or `None` if it is not parsed for imports
    pub fn for_path(path: &RepoPath) -> Option<Self> {
        let ext = path.extension()?;
        if JS_EXTENSIONS.contains(&ext.as_str()) {
            Some(Dialect::JavaScript)
        } else if PYTHON_EXTENSIONS.contains(&ext.as_str()) {
            Some(Dialect::Python)
        } else {
            None
        }
    }

    /// Raw specifiers found in `source`
    pub fn extract(self, source: &str) -> Vec<String> {
        match self {
            Dialect::JavaScript => JsImportExtractor::extract(source),
            Dialect::Python => PythonImportExtractor::extract(source),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::JavaScript => write!(f, "javascript"),
            Dialect::Python => write!(f, "python"),
        }
    }
}

/// A raw specifier together with where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub raw: String,
    pub dialect: Dialect,
    pub from: RepoPath,
}

/// Extract every specifier of a source file, tagged with its origin
pub fn extract_imports(path: &RepoPath, dialect: Dialect, source: &str) -> Vec<ImportSpecifier> {
    dialect
        .extract(source)
        .into_iter()
        .map(|raw| ImportSpecifier {
            raw,
            dialect,
            from: path.clone(),
        })
        .collect()
}
