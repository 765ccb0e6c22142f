//! Scan orchestration
//!
//! A scan runs two passes. The archive pass visits every entry once: each
//! path becomes a graph node, textual files are line-counted into the tree,
//! and small source files in a supported dialect are kept for later. The
//! import pass then extracts and resolves specifiers from the kept files
//! only, appending edges.
//!
//! Any failure during the archive pass aborts the scan. Nothing is returned
//! and nothing is persisted.

use crate::core::archive::ArchiveWalker;
use crate::core::classifier::{looks_textual, HEADER_LEN};
use crate::core::graph_assembler::GraphAssembler;
use crate::core::line_counter::count_lines;
use crate::core::parallel::{parallel_map_with_progress, ProgressUpdate};
use crate::core::tree_builder::TreeBuilder;
use crate::error::{Result, ScanError};
use crate::fetch::{ArchiveSource, GithubZipball, LocalArchive};
use crate::models::config::Settings;
use crate::models::repo::RepoCoordinates;
use crate::models::repo_path::RepoPath;
use crate::models::scan::{ScanRecord, ScanResult, ScanSummary};
use crate::parsers::{extract_imports, Dialect};
use crate::store::{JsonFileStore, ScanStore};
use crate::utils::path_resolver::PathResolver;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Archive entries between two progress reports
const PROGRESS_INTERVAL: usize = 64;

/// Callback receiving progress of a running scan
pub type ProgressCallback = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// A source file kept from the archive pass for import extraction
struct RetainedSource {
    path: RepoPath,
    dialect: Dialect,
    text: String,
}

/// Runs scans and, when a store is attached, persists their results
pub struct Scanner {
    settings: Settings,
    source: Option<Arc<dyn ArchiveSource>>,
    store: Option<Arc<dyn ScanStore>>,
    progress: Option<ProgressCallback>,
}

impl Scanner {
    /// A scanner with no archive source and no store attached
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            source: None,
            store: None,
            progress: None,
        }
    }

    /// A scanner wired to the GitHub zipball API and, if `persist` is set,
    /// to a [`JsonFileStore`] under `data_dir`
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let source = GithubZipball::from_settings(&settings)?;
        let store = settings
            .persist
            .then(|| JsonFileStore::new(settings.data_dir.clone()));

        let mut scanner = Self::new(settings).with_source(source);
        if let Some(store) = store {
            scanner = scanner.with_store(store);
        }
        Ok(scanner)
    }

    pub fn with_source(mut self, source: impl ArchiveSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn with_store(mut self, store: impl ScanStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Attach a store that is shared with other owners
    pub fn with_shared_store(mut self, store: Arc<dyn ScanStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> Option<&Arc<dyn ScanStore>> {
        self.store.as_ref()
    }

    /// Parse a repository URL, fetch its archive, scan and persist it
    pub fn scan_url(&self, url: &str) -> Result<ScanResult> {
        self.scan_url_with(url, true)
    }

    fn scan_url_with(&self, url: &str, report: bool) -> Result<ScanResult> {
        let coords = RepoCoordinates::parse(url)?;
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| ScanError::config_error("no archive source configured"))?;

        let bytes = source.fetch(&coords, self.settings.max_bytes)?;
        let result = self.scan_bytes(&coords, &bytes, report)?;
        self.persist(&result)?;
        Ok(result)
    }

    /// Scan a ZIP file on disk and persist the result.
    ///
    /// Without explicit coordinates the archive is attributed to the
    /// `local` owner and named after the file.
    pub fn scan_local(&self, path: &Path, coords: Option<RepoCoordinates>) -> Result<ScanResult> {
        let coords = coords.unwrap_or_else(|| RepoCoordinates::for_local_archive(path));
        let bytes = LocalArchive::new(path).fetch(&coords, self.settings.max_bytes)?;
        let result = self.scan_bytes(&coords, &bytes, true)?;
        self.persist(&result)?;
        Ok(result)
    }

    /// Scan several repositories in parallel.
    ///
    /// Each scan owns its intermediate state. One result per input, in input
    /// order; a failed scan does not affect the others.
    pub fn scan_many(&self, urls: &[String]) -> Vec<Result<ScanResult>> {
        let progress = self.progress.clone();
        parallel_map_with_progress(
            urls,
            |url| self.scan_url_with(url, false),
            move |update| {
                if let Some(callback) = &progress {
                    callback(update);
                }
            },
        )
    }

    /// Scan archive bytes. Pure: nothing is fetched or persisted.
    pub fn scan_archive(&self, coords: &RepoCoordinates, bytes: &[u8]) -> Result<ScanResult> {
        self.scan_bytes(coords, bytes, true)
    }

    fn scan_bytes(&self, coords: &RepoCoordinates, bytes: &[u8], report: bool) -> Result<ScanResult> {
        let started = Instant::now();
        let limits = self.settings.limits();
        info!(repo = %coords, bytes = bytes.len(), "scanning archive");

        let mut walker = ArchiveWalker::from_bytes(bytes, limits)?;
        let total_records = walker.record_count();
        let mut tree = TreeBuilder::new();
        let mut graph = GraphAssembler::new();
        let mut retained: Vec<RetainedSource> = Vec::new();
        let mut text_files = 0usize;

        if report {
            self.report(ProgressUpdate::new(0, total_records, format!("Reading {}", coords)));
        }

        // Archive pass
        while let Some(entry) = walker.next_entry()? {
            graph.add_node(&entry.path);

            let header = &entry.content[..entry.content.len().min(HEADER_LEN)];
            if !looks_textual(&entry.path, header) {
                debug!(path = %entry.path, "skipping binary file");
                continue;
            }

            text_files += 1;
            tree.insert(&entry.path, count_lines(&entry.content));

            if let Some(dialect) = Dialect::for_path(&entry.path) {
                if (entry.content.len() as u64) < self.settings.max_parse_bytes {
                    retained.push(RetainedSource {
                        text: String::from_utf8_lossy(&entry.content).into_owned(),
                        path: entry.path,
                        dialect,
                    });
                } else {
                    debug!(path = %entry.path, size = entry.content.len(), "too large to parse");
                }
            }

            if report && walker.files_seen() % PROGRESS_INTERVAL == 0 {
                self.report(ProgressUpdate::new(
                    walker.position(),
                    total_records,
                    format!("Reading {}", coords),
                ));
            }
        }

        let files_scanned = walker.files_seen();
        debug!(
            files = files_scanned,
            text_files,
            retained = retained.len(),
            "archive pass complete"
        );

        // Import pass
        let mut edges = Vec::new();
        {
            let resolver = PathResolver::new(graph.known_paths());
            for file in &retained {
                let specifiers = extract_imports(&file.path, file.dialect, &file.text);
                trace!(path = %file.path, count = specifiers.len(), "extracted imports");
                for spec in specifiers {
                    if let Some(target) = resolver.resolve(&spec) {
                        edges.push((spec.from, target));
                    }
                }
            }
        }
        for (source, target) in edges {
            graph.add_edge(source, target);
        }

        let tree = tree.finalize();
        let graph = graph.finish();

        let summary = ScanSummary {
            scan_id: Uuid::new_v4().to_string(),
            owner: coords.owner.clone(),
            repo: coords.repo.clone(),
            repo_url: coords.canonical_url(),
            created_at: Utc::now().timestamp(),
            files_scanned,
            text_files,
            parsed_files: retained.len(),
            total_loc: tree.loc,
            edge_count: graph.edge_count(),
            limits,
        };

        if report {
            self.report(ProgressUpdate::new(
                total_records,
                total_records,
                format!("Scanned {}", coords),
            ));
        }
        info!(
            repo = %coords,
            scan_id = %summary.scan_id,
            files = summary.files_scanned,
            loc = summary.total_loc,
            edges = summary.edge_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(ScanResult {
            summary,
            tree,
            graph,
        })
    }

    fn persist(&self, result: &ScanResult) -> Result<()> {
        if !self.settings.persist {
            return Ok(());
        }
        if let Some(store) = &self.store {
            let record = ScanRecord {
                summary: result.summary.clone(),
                tree: result.tree.clone(),
                graph: Some(result.graph.clone()),
            };
            store.save(&record)?;
        }
        Ok(())
    }

    fn report(&self, update: ProgressUpdate) {
        if let Some(callback) = &self.progress {
            callback(update);
        }
    }
}
