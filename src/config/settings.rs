//! Settings validation

use crate::error::{Result, ScanError};
use crate::models::config::Settings;
use std::path::Path;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.max_bytes == 0 {
            return Err(ScanError::config_error("max_bytes must be at least 1"));
        }
        if settings.max_files == 0 {
            return Err(ScanError::config_error("max_files must be at least 1"));
        }
        if settings.max_parse_bytes == 0 {
            return Err(ScanError::config_error("max_parse_bytes must be at least 1"));
        }
        if settings.max_parse_bytes > settings.max_bytes {
            return Err(ScanError::config_error(format!(
                "max_parse_bytes ({}) cannot exceed max_bytes ({})",
                settings.max_parse_bytes, settings.max_bytes
            )));
        }
        if settings.request_timeout_secs == 0 {
            return Err(ScanError::config_error(
                "request_timeout_secs must be at least 1",
            ));
        }

        if settings.data_dir.as_os_str().is_empty() {
            return Err(ScanError::config_error("data_dir cannot be empty"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path's directory exists
    fn validate_output_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(ScanError::config_error("output_file cannot be empty"));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ScanError::config_error(format!(
                    "output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }
}
