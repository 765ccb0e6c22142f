//! Error handling for codelens
//!
//! Error types, the crate-wide result alias, and context utilities.

pub mod context;
pub mod types;

pub use context::{handle_error, ResultExt};
pub use types::{ErrorSeverity, LimitKind, Result, ScanError};
