//! In-process scan store

use super::{is_valid_scan_id, ScanStore};
use crate::error::{Result, ScanError};
use crate::models::scan::ScanRecord;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Scan records held in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, ScanRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ScanStore for MemoryStore {
    fn save(&self, record: &ScanRecord) -> Result<()> {
        if !is_valid_scan_id(record.scan_id()) {
            return Err(ScanError::invalid_input(record.scan_id(), "invalid scan id"));
        }
        self.records
            .lock()
            .insert(record.scan_id().to_string(), record.clone());
        Ok(())
    }

    fn load(&self, scan_id: &str) -> Result<ScanRecord> {
        self.records
            .lock()
            .get(scan_id)
            .cloned()
            .ok_or_else(|| ScanError::NotFound {
                scan_id: scan_id.to_string(),
            })
    }

    fn exists(&self, scan_id: &str) -> bool {
        self.records.lock().contains_key(scan_id)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.records.lock().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
