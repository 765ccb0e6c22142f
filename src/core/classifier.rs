//! Text versus binary classification

use crate::models::repo_path::RepoPath;

/// Bytes of file content inspected by [`looks_textual`]
pub const HEADER_LEN: usize = 4096;

/// Extensions always treated as text, whatever their content
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".tsx", ".jsx", ".json", ".md", ".yml", ".yaml", ".toml", ".css",
    ".scss", ".html", ".txt", ".rs", ".go", ".java", ".c", ".cpp", ".h", ".hpp", ".sh", ".rb",
    ".php", ".cs",
];

/// Decide whether a file should be line-counted and parsed.
///
/// Allowlisted extensions win. Otherwise a NUL byte in `header` means binary,
/// and anything else is text if the header decodes as UTF-8. A multi-byte
/// sequence cut off by the end of the header does not count against it.
pub fn looks_textual(path: &RepoPath, header: &[u8]) -> bool {
    if let Some(ext) = path.extension() {
        if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            return true;
        }
    }

    if header.contains(&0) {
        return false;
    }

    match std::str::from_utf8(header) {
        Ok(_) => true,
        // `error_len() == None` means the input ended mid-character
        Err(err) => err.error_len().is_none() && header.len() >= HEADER_LEN,
    }
}
