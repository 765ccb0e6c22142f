//! Repository coordinates

use crate::error::{Result, ScanError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Owner of repositories scanned from a local archive without `--repo`
pub const LOCAL_OWNER: &str = "local";

/// Owner/name pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
}

fn regex_repo_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"github\.com[:/]+(?P<owner>[^/\s]+)/(?P<repo>[A-Za-z0-9_.\-]+?)(?:\.git)?/?$")
            .expect("repository URL pattern is valid")
    })
}

impl RepoCoordinates {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse `https://github.com/<owner>/<repo>` style URLs.
    ///
    /// Accepts `http(s)://`, `www.`, SSH (`git@github.com:owner/repo.git`),
    /// a trailing slash, and a `.git` suffix.
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        let caps = regex_repo_url().captures(trimmed).ok_or_else(|| {
            ScanError::invalid_input(
                trimmed,
                "Unsupported repo URL. Use https://github.com/<owner>/<repo>",
            )
        })?;

        let owner = caps["owner"].to_string();
        let repo = caps["repo"].to_string();
        if repo.is_empty() || repo == "." || repo == ".." {
            return Err(ScanError::invalid_input(trimmed, "Repository name is empty"));
        }

        Ok(Self { owner, repo })
    }

    /// Coordinates for a zipball on disk: the file stem names the repo.
    pub fn for_local_archive(path: &Path) -> Self {
        let repo = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "archive".to_string());
        Self::new(LOCAL_OWNER, repo)
    }

    pub fn canonical_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_forms() {
        for url in [
            "https://github.com/rust-lang/cargo",
            "https://github.com/rust-lang/cargo/",
            "https://github.com/rust-lang/cargo.git",
            "http://www.github.com/rust-lang/cargo",
            "  https://github.com/rust-lang/cargo  ",
        ] {
            let coords = RepoCoordinates::parse(url).unwrap();
            assert_eq!(coords, RepoCoordinates::new("rust-lang", "cargo"), "{}", url);
        }
    }

    #[test]
    fn test_parse_ssh_form() {
        let coords = RepoCoordinates::parse("git@github.com:tokio-rs/tokio.git").unwrap();
        assert_eq!(coords.owner, "tokio-rs");
        assert_eq!(coords.repo, "tokio");
    }

    #[test]
    fn test_repo_names_keep_dots() {
        let coords = RepoCoordinates::parse("https://github.com/owner/my.lib.js").unwrap();
        assert_eq!(coords.repo, "my.lib.js");
    }

    #[test]
    fn test_rejects_unsupported_urls() {
        for url in [
            "https://gitlab.com/owner/repo",
            "https://github.com/owner",
            "https://github.com/owner/repo/tree/main",
            "not a url",
            "",
        ] {
            match RepoCoordinates::parse(url) {
                Err(ScanError::InvalidInput { .. }) => {}
                other => panic!("expected InvalidInput for {:?}, got {:?}", url, other),
            }
        }
    }

    #[test]
    fn test_canonical_url_and_local_archive() {
        let coords = RepoCoordinates::new("octo", "demo");
        assert_eq!(coords.canonical_url(), "https://github.com/octo/demo");
        assert_eq!(coords.to_string(), "octo/demo");

        let local = RepoCoordinates::for_local_archive(Path::new("/tmp/demo-main.zip"));
        assert_eq!(local, RepoCoordinates::new(LOCAL_OWNER, "demo-main"));
    }
}
