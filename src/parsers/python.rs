//! Import extraction for Python sources

use regex::Regex;
use std::sync::OnceLock;

// Anchored at line starts so prose mentioning "import" is not picked up
const IMPORT_PATTERN: &str = concat!(
    r"(?m)^[ \t]*(?:",
    r"from[ \t]+([.\w]+)[ \t]+import[ \t]+(?:\(\s*)?(\w+)?",
    r"|import[ \t]+([\w.]+)",
    r")",
);

fn import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IMPORT_PATTERN).expect("import pattern is valid"))
}

/// Extractor for the Python dialect
pub struct PythonImportExtractor;

impl PythonImportExtractor {
    /// Module specifiers in order of appearance, duplicates preserved.
    ///
    /// Only the module token is captured; aliases and additional names are
    /// ignored. A purely relative `from . import name` yields `.name`, so
    /// the imported submodule can still be resolved.
    pub fn extract(source: &str) -> Vec<String> {
        import_regex()
            .captures_iter(source)
            .filter_map(|caps| {
                if let Some(module) = caps.get(1) {
                    let module = module.as_str();
                    let relative_only = module.chars().all(|c| c == '.');
                    match caps.get(2) {
                        Some(name) if relative_only => Some(format!("{}{}", module, name.as_str())),
                        _ => Some(module.to_string()),
                    }
                } else {
                    caps.get(3).map(|m| m.as_str().to_string())
                }
            })
            .collect()
    }
}
