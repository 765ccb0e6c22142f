//! Zipball downloads from the GitHub REST API

use super::ArchiveSource;
use crate::error::{LimitKind, Result, ScanError};
use crate::models::config::Settings;
use crate::models::repo::RepoCoordinates;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("codelens/", env!("CARGO_PKG_VERSION"));

/// Downloads `<api>/repos/<owner>/<repo>/zipball` over blocking HTTP
pub struct GithubZipball {
    client: Client,
    api_base_url: String,
    token: Option<String>,
}

impl GithubZipball {
    pub fn new(api_base_url: &str, timeout: Duration, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
            settings.github_token.clone(),
        )
    }

    pub fn zipball_url(&self, coords: &RepoCoordinates) -> String {
        format!(
            "{}/repos/{}/{}/zipball",
            self.api_base_url, coords.owner, coords.repo
        )
    }
}

impl ArchiveSource for GithubZipball {
    fn fetch(&self, coords: &RepoCoordinates, max_bytes: u64) -> Result<Vec<u8>> {
        let url = self.zipball_url(coords);
        info!(url = %url, "downloading zipball");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScanError::fetch_error(
                url,
                "repository not found (it may be private or may not exist)",
            ));
        }
        if !status.is_success() {
            return Err(ScanError::fetch_error(url, format!("HTTP {}", status)));
        }

        if let Some(length) = response.content_length() {
            debug!(length, "zipball content length");
            if length > max_bytes {
                warn!(length, max_bytes, "zipball larger than byte limit");
                return Err(ScanError::limit_exceeded(LimitKind::Bytes, max_bytes, length));
            }
        }

        read_capped(response, max_bytes, &url)
    }

    fn describe(&self) -> String {
        self.api_base_url.clone()
    }
}

/// Read a body, failing as soon as more than `max_bytes` arrive
pub fn read_capped<R: Read>(reader: R, max_bytes: u64, url: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| ScanError::fetch_error(url, e.to_string()))?;

    if buf.len() as u64 > max_bytes {
        warn!(max_bytes, "download exceeded byte limit");
        return Err(ScanError::limit_exceeded(
            LimitKind::Bytes,
            max_bytes,
            buf.len() as u64,
        ));
    }
    Ok(buf)
}
