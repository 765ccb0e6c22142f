//! Import extraction for JavaScript and TypeScript sources
//!
//! Text pattern matching, not a grammar. Four surface forms are recognized:
//!
//! - `import x from "mod"` / `import "mod"`
//! - `export { x } from "mod"` / `export * from "mod"`
//! - `require("mod")`
//! - `import("mod")`
//!
//! Matches inside strings or comments are not filtered out.

use regex::Regex;
use std::sync::OnceLock;

const IMPORT_PATTERN: &str = concat!(
    r#"\bimport\s+(?:[\w*{}\s,$]+?\s+from\s+)?["']([^"'\n]+)["']"#,
    r#"|\bexport\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s+from\s+["']([^"'\n]+)["']"#,
    r#"|\brequire\s*\(\s*["']([^"'\n]+)["']\s*\)"#,
    r#"|\bimport\s*\(\s*["']([^"'\n]+)["']\s*\)"#,
);

fn import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IMPORT_PATTERN).expect("import pattern is valid"))
}

/// Extractor for the JS/TS dialect
pub struct JsImportExtractor;

impl JsImportExtractor {
    /// Specifiers in order of appearance, duplicates preserved
    pub fn extract(source: &str) -> Vec<String> {
        import_regex()
            .captures_iter(source)
            .filter_map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .next()
                    .map(|m| m.as_str().to_string())
            })
            .collect()
    }
}
