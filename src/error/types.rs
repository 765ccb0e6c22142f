//! Error types and definitions for codelens
//!
//! Every failure a scan can produce is a variant of [`ScanError`]. Scans are
//! all-or-nothing, so an error returned from the scanner always means no
//! summary, tree, or graph was produced or persisted.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Which archive ceiling was breached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Total decompressed (or downloaded) bytes
    Bytes,
    /// Number of non-directory archive entries
    Files,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::Bytes => write!(f, "byte"),
            LimitKind::Files => write!(f, "file count"),
        }
    }
}

/// Main error type for codelens operations
#[derive(Debug, Error)]
pub enum ScanError {
    /// Malformed repository coordinates or URL
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// Byte or entry-count ceiling breached during archive traversal
    #[error("Repository exceeds {limit} limit of {limit_value}")]
    LimitExceeded {
        limit: LimitKind,
        limit_value: u64,
        observed: u64,
    },

    /// No stored scan with this identifier
    #[error("Scan not found: {scan_id}")]
    NotFound { scan_id: String },

    /// The stored scan predates dependency graph support
    #[error("Dependency graph unavailable for scan {scan_id}")]
    GraphUnavailable { scan_id: String },

    /// Corrupt or unreadable archive
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// The archive byte supplier failed
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Scan store read/write failure
    #[error("Scan store error at {path}: {message}")]
    Store { path: PathBuf, message: String },

    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// CSV output errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScanError::NotFound { .. } => ErrorSeverity::Warning,
            ScanError::GraphUnavailable { .. } => ErrorSeverity::Warning,

            ScanError::Config { .. } => ErrorSeverity::Critical,
            ScanError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ScanError::ConfigRead { .. } => ErrorSeverity::Critical,
            ScanError::ConfigParse { .. } => ErrorSeverity::Critical,
            ScanError::StdoutWrite { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ScanError::InvalidInput { input, reason } => {
                format!("Cannot use '{}': {}", input, reason)
            }
            ScanError::LimitExceeded {
                limit: LimitKind::Bytes,
                limit_value,
                ..
            } => {
                let limit = if *limit_value >= 1024 * 1024 {
                    format!("{} MB", limit_value / (1024 * 1024))
                } else {
                    format!("{} byte", limit_value)
                };
                format!(
                    "Repository exceeds the {} size limit. The scan was aborted and nothing was saved.",
                    limit
                )
            }
            ScanError::LimitExceeded {
                limit: LimitKind::Files,
                limit_value,
                ..
            } => {
                format!(
                    "Repository exceeds the {} files limit. The scan was aborted and nothing was saved.",
                    limit_value
                )
            }
            ScanError::NotFound { scan_id } => {
                format!("No scan with id '{}' exists.", scan_id)
            }
            ScanError::GraphUnavailable { scan_id } => {
                format!(
                    "Scan '{}' was recorded before dependency graphs were produced; re-run the scan to get one.",
                    scan_id
                )
            }
            ScanError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            _ => self.to_string(),
        }
    }

    /// A follow-up hint for the user, if one applies
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ScanError::InvalidInput { .. } => {
                Some("Use a repository URL of the form https://github.com/<owner>/<repo>")
            }
            ScanError::LimitExceeded { .. } => {
                Some("Raise the ceiling with --max-bytes / --max-files if the repository is trusted")
            }
            ScanError::NotFound { .. } => Some("Run `codelens list` to see stored scan ids"),
            ScanError::ConfigNotFound { .. } => {
                Some("Create a config file with `codelens init` or pass --config")
            }
            _ => None,
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(limit: LimitKind, limit_value: u64, observed: u64) -> Self {
        ScanError::LimitExceeded {
            limit,
            limit_value,
            observed,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ScanError::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an archive error
    pub fn archive_error(message: impl Into<String>) -> Self {
        ScanError::Archive {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ScanError::Config {
            message: message.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScanError::Store {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io { source: err }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Json { source: err }
    }
}

impl From<csv::Error> for ScanError {
    fn from(err: csv::Error) -> Self {
        ScanError::Csv { source: err }
    }
}

impl From<toml::de::Error> for ScanError {
    fn from(err: toml::de::Error) -> Self {
        ScanError::config_error(err.to_string())
    }
}

impl From<zip::result::ZipError> for ScanError {
    fn from(err: zip::result::ZipError) -> Self {
        ScanError::archive_error(err.to_string())
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        ScanError::fetch_error(url, err.to_string())
    }
}

/// Result type alias for codelens operations
pub type Result<T> = std::result::Result<T, ScanError>;
