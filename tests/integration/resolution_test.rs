//! Import resolution through whole-archive scans

use crate::fixtures::archive_builder::ArchiveBuilder;
use codelens::{RepoCoordinates, ScanResult, Scanner, Settings};

fn scan(archive: ArchiveBuilder) -> ScanResult {
    Scanner::new(Settings::default())
        .scan_archive(&RepoCoordinates::new("octo", "demo"), &archive.build())
        .unwrap()
}

fn edges(result: &ScanResult) -> Vec<(String, String)> {
    result
        .graph
        .edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

fn edge(source: &str, target: &str) -> (String, String) {
    (source.to_string(), target.to_string())
}

#[test]
fn test_relative_js_import_resolves_to_sibling_file() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("src/app.ts", "import { x } from \"./util\";\n")
            .file("src/util.ts", "export const x = 1;\n"),
    );
    assert_eq!(edges(&result), vec![edge("src/app.ts", "src/util.ts")]);
}

#[test]
fn test_relative_js_import_resolves_to_index_file() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("src/app.ts", "import { x } from \"./util\";\n")
            .file("src/util/index.ts", "export const x = 1;\n"),
    );
    assert_eq!(edges(&result), vec![edge("src/app.ts", "src/util/index.ts")]);
}

#[test]
fn test_js_extension_priority() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("lib/main.js", "const a = require('./dep');\n")
            .file("lib/dep.js", "module.exports = 1;\n")
            .file("lib/dep.ts", "export default 1;\n"),
    );
    // `.ts` is tried before `.js`
    assert_eq!(edges(&result), vec![edge("lib/main.js", "lib/dep.ts")]);
}

#[test]
fn test_all_js_forms_produce_edges() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file(
                "src/index.js",
                concat!(
                    "import a from './a';\n",
                    "export { b } from './b';\n",
                    "const c = require('./c');\n",
                    "const d = await import('./d');\n",
                ),
            )
            .file("src/a.js", "")
            .file("src/b.js", "")
            .file("src/c.js", "")
            .file("src/d.js", ""),
    );
    assert_eq!(
        edges(&result),
        vec![
            edge("src/index.js", "src/a.js"),
            edge("src/index.js", "src/b.js"),
            edge("src/index.js", "src/c.js"),
            edge("src/index.js", "src/d.js"),
        ]
    );
}

#[test]
fn test_parent_directory_imports() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("src/features/cart.tsx", "import config from '../../config.json';\nimport '../shared';\n")
            .file("src/shared.jsx", "")
            .file("config.json", "{}\n"),
    );
    assert_eq!(
        edges(&result),
        vec![
            edge("src/features/cart.tsx", "config.json"),
            edge("src/features/cart.tsx", "src/shared.jsx"),
        ]
    );
}

#[test]
fn test_external_packages_are_silently_dropped() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("src/app.tsx", "import React from \"react\";\nimport lodash from 'lodash/fp';\n")
            .file("src/main.py", "import requests\nfrom django.db import models\n"),
    );
    assert!(result.graph.edges.is_empty());
    assert_eq!(result.summary.parsed_files, 2);
}

#[test]
fn test_python_relative_package_import() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("pkg/mod.py", "from . import helpers\n")
            .file("pkg/helpers.py", "def f():\n    pass\n"),
    );
    assert_eq!(edges(&result), vec![edge("pkg/mod.py", "pkg/helpers.py")]);
}

#[test]
fn test_python_absolute_import_resolves_package_init() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("tools/cli.py", "import pkg.sub\n")
            .file("pkg/__init__.py", "")
            .file("pkg/sub/__init__.py", "VALUE = 1\n"),
    );
    assert_eq!(edges(&result), vec![edge("tools/cli.py", "pkg/sub/__init__.py")]);
}

#[test]
fn test_python_module_file_beats_package() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("main.py", "from util import helper\n")
            .file("util.py", "")
            .file("util/__init__.py", ""),
    );
    assert_eq!(edges(&result), vec![edge("main.py", "util.py")]);
}

#[test]
fn test_python_parent_relative_import() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("app/api/views.py", "from ..models import User\n")
            .file("app/models.py", "class User:\n    pass\n"),
    );
    assert_eq!(edges(&result), vec![edge("app/api/views.py", "app/models.py")]);
}

#[test]
fn test_duplicate_and_self_edges_are_kept() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file(
                "a.js",
                "import x from './b';\nimport y from './b';\nconst me = require('./a');\n",
            )
            .file("b.js", ""),
    );
    assert_eq!(
        edges(&result),
        vec![edge("a.js", "b.js"), edge("a.js", "b.js"), edge("a.js", "a.js")]
    );
    assert_eq!(result.graph.statistics().self_edges, 1);
}

#[test]
fn test_non_source_files_are_not_parsed() {
    let result = scan(
        ArchiveBuilder::zipball("octo-demo-1")
            .file("README.md", "import './b';\n")
            .file("notes.txt", "from . import b\n")
            .file("b.js", ""),
    );
    assert!(result.graph.edges.is_empty());
    assert_eq!(result.summary.parsed_files, 1);
}
