//! End-to-end scans of synthetic repository archives

use crate::fixtures::archive_builder::{sample_repository, ArchiveBuilder};
use codelens::{
    LimitKind, MemoryArchive, MemoryStore, RepoCoordinates, ScanError, ScanResult, ScanStore,
    Scanner, Settings, TreeNode,
};
use std::sync::Arc;

fn settings() -> Settings {
    Settings {
        persist: true,
        ..Settings::default()
    }
}

fn coords() -> RepoCoordinates {
    RepoCoordinates::new("octo", "demo")
}

fn edges(result: &ScanResult) -> Vec<(String, String)> {
    result
        .graph
        .edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

/// Every directory aggregates its children, recursively
fn assert_tree_invariant(node: &TreeNode) {
    if node.children.is_empty() {
        return;
    }
    let sum: u64 = node.children.iter().map(|c| c.loc).sum();
    assert_eq!(node.loc, sum, "aggregate mismatch at {}", node.name);
    for pair in node.children.windows(2) {
        assert!(pair[0].name < pair[1].name, "children of {} not sorted", node.name);
    }
    for child in &node.children {
        assert_tree_invariant(child);
    }
}

#[test]
fn test_sample_repository_scan() {
    let result = Scanner::new(settings())
        .scan_archive(&coords(), &sample_repository())
        .unwrap();

    let summary = &result.summary;
    assert_eq!(summary.owner, "octo");
    assert_eq!(summary.repo, "demo");
    assert_eq!(summary.files_scanned, 9);
    assert_eq!(summary.text_files, 8);
    assert_eq!(summary.parsed_files, 7);
    assert_eq!(summary.total_loc, 14);
    assert_eq!(summary.edge_count, 5);

    assert_eq!(
        edges(&result),
        vec![
            ("src/app.ts".to_string(), "src/util.ts".to_string()),
            ("src/app.ts".to_string(), "src/components/index.tsx".to_string()),
            ("pkg/mod.py".to_string(), "pkg/helpers.py".to_string()),
            ("scripts/run.py".to_string(), "pkg/mod.py".to_string()),
            ("scripts/run.py".to_string(), "pkg/__init__.py".to_string()),
        ]
    );
}

#[test]
fn test_tree_invariant_holds() {
    let result = Scanner::new(settings())
        .scan_archive(&coords(), &sample_repository())
        .unwrap();

    assert_eq!(result.tree.name, "root");
    assert_eq!(result.tree.leaf_loc_total(), result.summary.total_loc);
    assert_eq!(result.tree.loc, result.summary.total_loc);
    assert_tree_invariant(&result.tree);

    assert_eq!(result.tree.find("src").map(|n| n.loc), Some(5));
    assert_eq!(result.tree.find("pkg/__init__.py").map(|n| n.loc), Some(0));
    assert_eq!(result.tree.find("README.md").map(|n| n.loc), Some(3));
}

#[test]
fn test_binary_file_is_a_node_but_not_counted() {
    let result = Scanner::new(settings())
        .scan_archive(&coords(), &sample_repository())
        .unwrap();

    assert!(result
        .graph
        .nodes
        .iter()
        .any(|n| n.id.as_str() == "assets/logo.bin"));
    assert!(result.tree.find("assets/logo.bin").is_none());
    assert!(!edges(&result)
        .iter()
        .any(|(s, t)| s == "assets/logo.bin" || t == "assets/logo.bin"));
}

#[test]
fn test_character_split_at_header_boundary_counts_as_text() {
    // "é" straddles the 4 KiB classification header
    let mut notice = "a".repeat(4095);
    notice.push_str("é\nmore\n");

    let result = Scanner::new(settings())
        .scan_archive(
            &coords(),
            &ArchiveBuilder::zipball("octo-demo-1").file("NOTICE", notice).build(),
        )
        .unwrap();

    assert_eq!(result.summary.text_files, 1);
    assert_eq!(result.summary.total_loc, 2);
    assert_eq!(result.tree.find("NOTICE").map(|n| n.loc), Some(2));
}

#[test]
fn test_nodes_cover_every_file() {
    let result = Scanner::new(settings())
        .scan_archive(&coords(), &sample_repository())
        .unwrap();

    let mut nodes: Vec<&str> = result.graph.nodes.iter().map(|n| n.id.as_str()).collect();
    nodes.sort();
    assert_eq!(
        nodes,
        vec![
            "README.md",
            "assets/logo.bin",
            "pkg/__init__.py",
            "pkg/helpers.py",
            "pkg/mod.py",
            "scripts/run.py",
            "src/app.ts",
            "src/components/index.tsx",
            "src/util.ts",
        ]
    );
}

#[test]
fn test_scanning_twice_is_idempotent() {
    let scanner = Scanner::new(settings());
    let bytes = sample_repository();

    let first = scanner.scan_archive(&coords(), &bytes).unwrap();
    let second = scanner.scan_archive(&coords(), &bytes).unwrap();

    assert_eq!(first.tree, second.tree);
    assert_eq!(first.graph, second.graph);
    assert_ne!(first.summary.scan_id, second.summary.scan_id);
}

#[test]
fn test_file_limit_aborts_and_persists_nothing() {
    let store = Arc::new(MemoryStore::new());
    let scanner = Scanner::new(Settings {
        max_files: 8,
        ..settings()
    })
    .with_source(MemoryArchive::single(sample_repository()))
    .with_shared_store(store.clone());

    match scanner.scan_url("https://github.com/octo/demo") {
        Err(ScanError::LimitExceeded {
            limit: LimitKind::Files,
            limit_value,
            ..
        }) => assert_eq!(limit_value, 8),
        other => panic!("expected file limit, got {:?}", other.map(|r| r.summary)),
    }
    assert!(store.is_empty());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_byte_limit_aborts_and_persists_nothing() {
    let big = "x = 1\n".repeat(1000);
    let archive = ArchiveBuilder::zipball("octo-big-1")
        .file("a.py", &big)
        .file("b.py", &big)
        .build();

    let store = Arc::new(MemoryStore::new());
    let scanner = Scanner::new(Settings {
        max_bytes: 8000,
        max_parse_bytes: 8000,
        ..settings()
    })
    .with_source(MemoryArchive::single(archive))
    .with_shared_store(store.clone());

    match scanner.scan_url("https://github.com/octo/big") {
        Err(ScanError::LimitExceeded {
            limit: LimitKind::Bytes,
            ..
        }) => {}
        other => panic!("expected byte limit, got {:?}", other.map(|r| r.summary)),
    }
    assert!(store.is_empty());
}

#[test]
fn test_archive_at_the_limits_succeeds() {
    let archive = ArchiveBuilder::zipball("octo-edge-1")
        .file("a.txt", "12345")
        .file("b.txt", "67890")
        .build();

    let scanner = Scanner::new(Settings {
        max_bytes: 10,
        max_files: 2,
        max_parse_bytes: 10,
        ..settings()
    });
    let result = scanner.scan_archive(&coords(), &archive).unwrap();
    assert_eq!(result.summary.files_scanned, 2);
    assert_eq!(result.summary.total_loc, 2);
    assert_eq!(result.summary.limits.max_bytes, 10);
}

#[test]
fn test_corrupt_archive_is_an_archive_error() {
    let scanner = Scanner::new(settings());
    assert!(matches!(
        scanner.scan_archive(&coords(), b"definitely not a zip"),
        Err(ScanError::Archive { .. })
    ));
}

#[test]
fn test_invalid_url_is_invalid_input() {
    let scanner = Scanner::new(settings()).with_source(MemoryArchive::single(sample_repository()));
    assert!(matches!(
        scanner.scan_url("https://example.com/not/github"),
        Err(ScanError::InvalidInput { .. })
    ));
}

#[test]
fn test_flat_archive_keeps_paths() {
    let archive = ArchiveBuilder::flat()
        .file("main.py", "import lib\n")
        .file("lib.py", "VALUE = 1\n")
        .build();

    let result = Scanner::new(settings())
        .scan_archive(&coords(), &archive)
        .unwrap();
    assert_eq!(
        edges(&result),
        vec![("main.py".to_string(), "lib.py".to_string())]
    );
    assert!(result.tree.find("main.py").is_some());
}

#[test]
fn test_scan_many_keeps_input_order() {
    let store = Arc::new(MemoryStore::new());
    let source = MemoryArchive::new()
        .with_archive(RepoCoordinates::new("octo", "demo"), sample_repository())
        .with_archive(
            RepoCoordinates::new("octo", "tiny"),
            ArchiveBuilder::zipball("octo-tiny-1").file("x.py", "1\n").build(),
        );
    let scanner = Scanner::new(settings())
        .with_source(source)
        .with_shared_store(store.clone());

    let urls = vec![
        "https://github.com/octo/tiny".to_string(),
        "https://github.com/octo/missing".to_string(),
        "https://github.com/octo/demo".to_string(),
    ];
    let results = scanner.scan_many(&urls);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().summary.repo, "tiny");
    assert!(matches!(results[1], Err(ScanError::Fetch { .. })));
    assert_eq!(results[2].as_ref().unwrap().summary.total_loc, 14);
    assert_eq!(store.len(), 2);
}
