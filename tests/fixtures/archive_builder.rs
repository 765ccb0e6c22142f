//! In-memory repository archives for integration tests

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Builds a zipball shaped like the ones code hosts serve: every entry
/// lives under one synthetic top-level directory.
pub struct ArchiveBuilder {
    prefix: Option<String>,
    dirs: Vec<String>,
    files: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    /// Entries nested under `<prefix>/`
    pub fn zipball(prefix: &str) -> Self {
        Self {
            prefix: Some(prefix.to_string()),
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Entries stored exactly as named
    pub fn flat() -> Self {
        Self {
            prefix: None,
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.dirs.push(name.trim_end_matches('/').to_string());
        self
    }

    pub fn file(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.files.push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    fn full_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) if name.is_empty() => format!("{}/", prefix),
            Some(prefix) => format!("{}/{}", prefix, name),
            None => name.to_string(),
        }
    }

    pub fn build(self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        if self.prefix.is_some() {
            writer.add_directory(self.full_name(""), options).unwrap();
        }
        for dir in &self.dirs {
            writer
                .add_directory(format!("{}/", self.full_name(dir)), options)
                .unwrap();
        }
        for (name, content) in &self.files {
            writer.start_file(self.full_name(name), options).unwrap();
            writer.write_all(content).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }
}

/// A small mixed-language repository
pub fn sample_repository() -> Vec<u8> {
    ArchiveBuilder::zipball("octo-demo-4f2a9c1")
        .dir("src")
        .file(
            "src/app.ts",
            "import { helper } from './util';\nimport React from 'react';\nexport * from './components';\n",
        )
        .file("src/util.ts", "export const helper = () => 1;\n")
        .file("src/components/index.tsx", "export const Button = () => null;\n")
        .file("pkg/__init__.py", "")
        .file("pkg/mod.py", "from . import helpers\nimport os\n")
        .file("pkg/helpers.py", "def helper():\n    return 1\n")
        .file("scripts/run.py", "import pkg.mod\nfrom pkg import helpers\n")
        .file("assets/logo.bin", [0x89u8, 0x50, 0x4e, 0x47, 0x00, 0x01, 0x02])
        .file("README.md", "# demo\n\nA sample repository.\n")
        .build()
}
