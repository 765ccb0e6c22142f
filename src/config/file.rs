//! Configuration file and environment variable sources

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{parser, ConfigSource};
use crate::error::{Result, ScanError};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".codelens.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(ScanError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings read from the environment, as `<PREFIX>_<SETTING>`
const ENV_KEYS: &[&str] = &[
    "MAX_BYTES",
    "MAX_FILES",
    "MAX_PARSE_BYTES",
    "DATA_DIR",
    "API_BASE_URL",
    "REQUEST_TIMEOUT_SECS",
    "GITHUB_TOKEN",
    "OUTPUT_FORMAT",
    "PERSIST",
];

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.var(key) {
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                ScanError::config_error(format!(
                    "Invalid value '{}' for {}_{}",
                    raw, self.prefix, key
                ))
            }),
            None => Ok(None),
        }
    }

    fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.var(key) {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                _ => Err(ScanError::config_error(format!(
                    "Invalid boolean '{}' for {}_{}",
                    raw, self.prefix, key
                ))),
            },
            None => Ok(None),
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(PartialSettings {
            max_bytes: self.parsed("MAX_BYTES")?,
            max_files: self.parsed("MAX_FILES")?,
            max_parse_bytes: self.parsed("MAX_PARSE_BYTES")?,
            data_dir: self.var("DATA_DIR").map(PathBuf::from),
            api_base_url: self.var("API_BASE_URL"),
            request_timeout_secs: self.parsed("REQUEST_TIMEOUT_SECS")?,
            github_token: self.var("GITHUB_TOKEN"),
            output_format: self.parsed("OUTPUT_FORMAT")?,
            persist: self.flag("PERSIST")?,
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
