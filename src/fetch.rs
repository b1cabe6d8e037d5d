//! Page model retrieval.
//!
//! Sources are URLs: `http(s)://` goes over the network, `file://` reads a
//! saved export from disk.

use std::path::Path;
use std::time::Duration;

use calwatch_core::config::WatchConfig;
use calwatch_core::{CalWatchError, CalWatchResult};
use serde_json::Value;
use tracing::debug;
use url::Url;

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: &WatchConfig) -> CalWatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CalWatchError::Fetch(format!("Could not build HTTP client: {e}")))?;

        Ok(Fetcher { client })
    }

    pub async fn fetch_document(&self, source_location: &str) -> CalWatchResult<Value> {
        let url = Url::parse(source_location).map_err(|e| {
            CalWatchError::Fetch(format!("Invalid source location '{source_location}': {e}"))
        })?;

        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => {
                let path = url.to_file_path().map_err(|_| {
                    CalWatchError::Fetch(format!("Invalid file URL '{source_location}'"))
                })?;
                let content = tokio::fs::read_to_string(&path).await?;
                parse_document(&content, &path)
            }
            other => Err(CalWatchError::Fetch(format!(
                "Unsupported source scheme '{other}' in '{source_location}'"
            ))),
        }
    }

    async fn fetch_http(&self, url: Url) -> CalWatchResult<Value> {
        debug!(%url, "fetching page model");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CalWatchError::Fetch(format!("GET {url} failed: {e}")))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| CalWatchError::Fetch(format!("GET {url} returned invalid JSON: {e}")))
    }
}

/// Read a saved page model export from disk.
pub fn read_document(path: &Path) -> CalWatchResult<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, path)
}

fn parse_document(content: &str, path: &Path) -> CalWatchResult<Value> {
    serde_json::from_str(content).map_err(|e| {
        CalWatchError::Serialization(format!("{} is not valid JSON: {e}", path.display()))
    })
}
