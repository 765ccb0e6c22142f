//! Configuration-related data structures

use super::scan::{ScanLimits, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES, DEFAULT_MAX_PARSE_BYTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default base URL of the code-hosting API serving zipballs
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Main configuration settings for codelens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Ceiling on decompressed bytes per scan
    pub max_bytes: u64,

    /// Ceiling on archive entries per scan
    pub max_files: usize,

    /// Largest source file that is parsed for imports
    pub max_parse_bytes: u64,

    /// Directory holding stored scan records
    pub data_dir: PathBuf,

    /// Base URL of the zipball API
    pub api_base_url: String,

    /// Timeout for archive downloads
    pub request_timeout_secs: u64,

    /// Token sent as a bearer credential when downloading archives
    pub github_token: Option<String>,

    /// Output format (text, json, csv, dot)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether successful scans are written to the scan store
    pub persist: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Settings {
    pub fn limits(&self) -> ScanLimits {
        ScanLimits {
            max_bytes: self.max_bytes,
            max_files: self.max_files,
        }
    }
}

/// Default location of the scan store
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("codelens").join("scans"))
        .unwrap_or_else(|| PathBuf::from(".codelens").join("scans"))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            max_parse_bytes: DEFAULT_MAX_PARSE_BYTES,
            data_dir: default_data_dir(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 60,
            github_token: None,
            output_format: OutputFormat::Text,
            output_file: None,
            persist: true,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT (dependency graph only)
    Dot,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub max_bytes: Option<u64>,
    pub max_files: Option<usize>,
    pub max_parse_bytes: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub github_token: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub persist: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.max_bytes.is_some() {
            self.max_bytes = other.max_bytes;
        }
        if other.max_files.is_some() {
            self.max_files = other.max_files;
        }
        if other.max_parse_bytes.is_some() {
            self.max_parse_bytes = other.max_parse_bytes;
        }
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.api_base_url.is_some() {
            self.api_base_url = other.api_base_url;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.github_token.is_some() {
            self.github_token = other.github_token;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.persist.is_some() {
            self.persist = other.persist;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(max_bytes) = self.max_bytes {
            settings.max_bytes = max_bytes;
        }
        if let Some(max_files) = self.max_files {
            settings.max_files = max_files;
        }
        // An unset parse guard follows a lowered byte ceiling
        settings.max_parse_bytes = match self.max_parse_bytes {
            Some(max_parse_bytes) => max_parse_bytes,
            None => settings.max_parse_bytes.min(settings.max_bytes),
        };
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(api_base_url) = &self.api_base_url {
            settings.api_base_url = api_base_url.clone();
        }
        if let Some(timeout) = self.request_timeout_secs {
            settings.request_timeout_secs = timeout;
        }
        if let Some(token) = &self.github_token {
            settings.github_token = Some(token.clone());
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(persist) = self.persist {
            settings.persist = persist;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
