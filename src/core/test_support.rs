//! Shared helpers for unit tests

use crate::models::dependency_graph::{DependencyEdge, DependencyGraph};
use crate::models::repo_path::RepoPath;
use crate::models::scan::{ScanLimits, ScanRecord, ScanSummary};
use crate::models::tree::{TreeNode, ROOT_NAME};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// One record of a synthetic archive
pub enum ZipItem<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8]),
}

impl<'a> ZipItem<'a> {
    pub fn dir(name: &'a str) -> Self {
        ZipItem::Dir(name)
    }

    pub fn file(name: &'a str, content: &'a [u8]) -> Self {
        ZipItem::File(name, content)
    }
}

/// Build a deflated ZIP archive in memory, entries in the given order
pub fn build_zip(items: &[ZipItem<'_>]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for item in items {
        match item {
            ZipItem::Dir(name) => writer.add_directory(*name, options).unwrap(),
            ZipItem::File(name, content) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }
        }
    }
    writer.finish().unwrap().into_inner()
}

/// A small stored record; `with_graph = false` mimics records written
/// before graphs were produced
pub fn sample_record(scan_id: &str, with_graph: bool) -> ScanRecord {
    let tree = TreeNode {
        name: ROOT_NAME.to_string(),
        loc: 5,
        children: vec![TreeNode::file("a.py", 2), TreeNode::file("b.py", 3)],
    };
    let graph = DependencyGraph::new(
        vec![RepoPath::normalize("a.py"), RepoPath::normalize("b.py")],
        vec![DependencyEdge {
            source: RepoPath::normalize("a.py"),
            target: RepoPath::normalize("b.py"),
        }],
    );

    ScanRecord {
        summary: ScanSummary {
            scan_id: scan_id.to_string(),
            owner: "octo".to_string(),
            repo: "demo".to_string(),
            repo_url: "https://github.com/octo/demo".to_string(),
            created_at: 1_700_000_000,
            files_scanned: 2,
            text_files: 2,
            parsed_files: 2,
            total_loc: 5,
            edge_count: 1,
            limits: ScanLimits::default(),
        },
        tree,
        graph: with_graph.then_some(graph),
    }
}
