//! Persistence of scans to the JSON file store

use crate::fixtures::archive_builder::{sample_repository, ArchiveBuilder};
use codelens::store::load_graph;
use codelens::{
    JsonFileStore, MemoryArchive, RepoCoordinates, ScanError, ScanStore, Scanner, Settings,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn scanner_with(store: Arc<JsonFileStore>, persist: bool) -> Scanner {
    let source = MemoryArchive::new()
        .with_archive(RepoCoordinates::new("octo", "demo"), sample_repository())
        .with_archive(
            RepoCoordinates::new("octo", "tiny"),
            ArchiveBuilder::zipball("octo-tiny-1").file("x.py", "1\n").build(),
        );
    Scanner::new(Settings {
        persist,
        ..Settings::default()
    })
    .with_source(source)
    .with_shared_store(store)
}

#[test]
fn test_scan_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    let scanner = scanner_with(store.clone(), true);

    let result = scanner.scan_url("https://github.com/octo/demo").unwrap();
    let scan_id = result.summary.scan_id.clone();

    assert!(store.exists(&scan_id));
    assert!(dir.path().join(format!("{}.json", scan_id)).is_file());

    let record = store.load(&scan_id).unwrap();
    assert_eq!(record.summary, result.summary);
    assert_eq!(record.tree, result.tree);
    assert_eq!(record.graph.as_ref(), Some(&result.graph));

    let graph = load_graph(store.as_ref(), &scan_id).unwrap();
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn test_persist_disabled_writes_nothing() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("scans")));
    let scanner = scanner_with(store.clone(), false);

    scanner.scan_url("https://github.com/octo/demo").unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(!dir.path().join("scans").exists());
}

#[test]
fn test_local_archive_scan_is_persisted() {
    let dir = tempdir().unwrap();
    let archive_path = dir.path().join("snapshot.zip");
    fs::write(&archive_path, sample_repository()).unwrap();

    let store = Arc::new(JsonFileStore::new(dir.path().join("scans")));
    let scanner = scanner_with(store.clone(), true);

    let result = scanner.scan_local(&archive_path, None).unwrap();
    assert_eq!(result.summary.owner, "local");
    assert_eq!(result.summary.repo, "snapshot");

    let ids = store.list().unwrap();
    assert_eq!(ids, vec![result.summary.scan_id.clone()]);
}

#[test]
fn test_missing_and_invalid_ids_are_not_found() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    for id in ["0f8b0c7e-2f57-4c59-9d7e-3b1c2d4e5f60", "../etc/passwd", ""] {
        assert!(matches!(store.load(id), Err(ScanError::NotFound { .. })), "{}", id);
        assert!(!store.exists(id));
    }
    assert!(matches!(
        load_graph(&store, "nope"),
        Err(ScanError::NotFound { .. })
    ));
}

#[test]
fn test_legacy_record_without_graph() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    let scanner = scanner_with(store.clone(), true);

    let result = scanner.scan_url("https://github.com/octo/tiny").unwrap();
    let scan_id = result.summary.scan_id;

    // Rewrite the record the way older versions stored it
    let path = store.record_path(&scan_id).unwrap();
    let mut document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    document.as_object_mut().unwrap().remove("graph");
    fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

    let record = store.load(&scan_id).unwrap();
    assert!(record.graph.is_none());
    assert_eq!(record.summary.total_loc, 1);
    assert!(matches!(
        load_graph(store.as_ref(), &scan_id),
        Err(ScanError::GraphUnavailable { .. })
    ));
}

#[test]
fn test_list_summaries_skips_unreadable_records() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    let scanner = scanner_with(store.clone(), true);

    let first = scanner.scan_url("https://github.com/octo/demo").unwrap();
    let second = scanner.scan_url("https://github.com/octo/tiny").unwrap();
    fs::write(
        dir.path().join("11111111-2222-3333-4444-555555555555.json"),
        "{ not json",
    )
    .unwrap();

    assert_eq!(store.list().unwrap().len(), 3);

    let summaries = store.list_summaries().unwrap();
    assert_eq!(summaries.len(), 2);
    let mut ids: Vec<&str> = summaries.iter().map(|s| s.scan_id.as_str()).collect();
    ids.sort();
    let mut expected = vec![first.summary.scan_id.as_str(), second.summary.scan_id.as_str()];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(summaries[0].created_at <= summaries[1].created_at);
}
