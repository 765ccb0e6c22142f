//! One JSON document per scan on the local filesystem

use super::{is_valid_scan_id, ScanStore};
use crate::error::{Result, ResultExt, ScanError};
use crate::models::scan::ScanRecord;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSION: &str = "json";

/// Stores each record at `<data_dir>/<scan_id>.json`.
///
/// Records are written to a hidden temporary sibling and renamed into place,
/// so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Location of a record. `None` for ids that are not valid storage keys.
    pub fn record_path(&self, scan_id: &str) -> Option<PathBuf> {
        if is_valid_scan_id(scan_id) {
            Some(self.data_dir.join(format!("{}.{}", scan_id, EXTENSION)))
        } else {
            None
        }
    }

    fn not_found(scan_id: &str) -> ScanError {
        ScanError::NotFound {
            scan_id: scan_id.to_string(),
        }
    }
}

impl ScanStore for JsonFileStore {
    fn save(&self, record: &ScanRecord) -> Result<()> {
        let scan_id = record.scan_id();
        let path = self
            .record_path(scan_id)
            .ok_or_else(|| ScanError::invalid_input(scan_id, "invalid scan id"))?;

        fs::create_dir_all(&self.data_dir).with_path_context(&self.data_dir)?;

        let tmp_path = self.data_dir.join(format!(".{}.{}.tmp", scan_id, EXTENSION));
        {
            let file = File::create(&tmp_path).with_path_context(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, record).with_path_context(&tmp_path)?;
            writer.flush().with_path_context(&tmp_path)?;
        }

        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ScanError::store_error(&path, err.to_string()));
        }

        info!(scan_id = %scan_id, path = %path.display(), "saved scan record");
        Ok(())
    }

    fn load(&self, scan_id: &str) -> Result<ScanRecord> {
        let path = self.record_path(scan_id).ok_or_else(|| Self::not_found(scan_id))?;
        if !path.is_file() {
            return Err(Self::not_found(scan_id));
        }

        debug!(path = %path.display(), "loading scan record");
        let file = File::open(&path).with_path_context(&path)?;
        serde_json::from_reader(BufReader::new(file)).with_path_context(&path)
    }

    fn exists(&self, scan_id: &str) -> bool {
        self.record_path(scan_id)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.data_dir).with_path_context(&self.data_dir)? {
            let path = entry.with_path_context(&self.data_dir)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_scan_id(stem) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
