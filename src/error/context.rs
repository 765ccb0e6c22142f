//! Error context utilities for codelens
//!
//! Helpers for attaching context to foreign errors and for reporting
//! errors according to their severity.

use crate::error::{ErrorSeverity, Result, ScanError};
use std::path::Path;
use tracing::{error, warn};

/// Extension trait attaching a scan store path to foreign errors
pub trait ResultExt<T, E> {
    /// Attribute an error to a scan store path
    fn with_path_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_path_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| ScanError::Store {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Report an error based on its severity
///
/// Warnings and regular errors are logged and swallowed; critical errors
/// are logged and handed back to the caller.
pub fn handle_error(err: ScanError) -> Option<ScanError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            error!("critical: {}", message);
            Some(err)
        }
    }
}
