//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{Result, ScanError};
use crate::models::config::PartialSettings;

/// Template written by `codelens init`
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScanError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ScanError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| ScanError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = |what: &str| {
        ScanError::config_error(format!("{} in config file: {}", what, path.display()))
    };

    if settings.max_bytes == Some(0) {
        return Err(invalid("Invalid max_bytes 0, must be at least 1"));
    }
    if settings.max_files == Some(0) {
        return Err(invalid("Invalid max_files 0, must be at least 1"));
    }
    if settings.max_parse_bytes == Some(0) {
        return Err(invalid("Invalid max_parse_bytes 0, must be at least 1"));
    }
    if settings.request_timeout_secs == Some(0) {
        return Err(invalid("Invalid request_timeout_secs 0, must be at least 1"));
    }

    if let Some(data_dir) = &settings.data_dir {
        if data_dir.as_os_str().is_empty() {
            return Err(invalid("Invalid empty data_dir"));
        }
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid("Invalid empty output_file"));
        }
    }

    if let Some(url) = &settings.api_base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(&format!("Invalid api_base_url '{}'", url)));
        }
    }

    Ok(())
}

/// Config file locations in lookup order: working directory, home
/// directory, then the platform config directory.
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("codelens").join("config.toml"));
    }
    locations
}

/// Parse the first existing file among `candidates`
pub fn find_config_in(candidates: &[PathBuf]) -> Result<Option<PartialSettings>> {
    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => Ok(Some(parse_config_file(path)?)),
        None => Ok(None),
    }
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    find_config_in(&default_config_locations())
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;

    Ok(())
}
