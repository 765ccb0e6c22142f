//! Parallel processing utilities

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Map `f` over `items` in parallel, reporting each completion.
///
/// Results come back in input order. Each item is processed independently;
/// one failing item does not affect the others.
pub fn parallel_map_with_progress<T, R, F, P>(items: &[T], f: F, progress_callback: P) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let completed = AtomicUsize::new(0);

    items
        .par_iter()
        .map(|item| {
            let result = f(item);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            progress_callback(ProgressUpdate::new(
                done,
                total,
                format!("Scanned {}/{} repositories", done, total),
            ));
            result
        })
        .collect()
}
