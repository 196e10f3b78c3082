// file: src/source/loader.rs
// description: fetches remote feeds and reads pre-saved local documents
// reference: https://docs.rs/reqwest

use crate::config::FetchConfig;
use crate::error::{HarvestError, Result};
use crate::models::{RawDocument, SourceConfig, SourceLocation};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// One client per run, with an explicit bounded timeout. No retries:
/// first failure is terminal for a required source.
pub struct SourceLoader {
    client: reqwest::Client,
}

impl SourceLoader {
    pub fn new(fetch: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .user_agent(fetch.user_agent.clone())
            .build()
            .map_err(|e| HarvestError::Config(format!("http client: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn load(&self, source: &SourceConfig) -> Result<RawDocument> {
        let body = match &source.location {
            SourceLocation::Remote(url) => self.fetch_remote(url).await?,
            SourceLocation::Local(path) => read_local(path, source)?,
        };

        debug!("Loaded source {} ({} bytes)", source.id, body.len());
        Ok(RawDocument::new(source.clone(), body))
    }

    async fn fetch_remote(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HarvestError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Fetch {
                url: url.to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        response.text().await.map_err(|e| HarvestError::Fetch {
            url: url.to_string(),
            reason: format!("body read failed: {}", e),
        })
    }
}

// Saved page sources are not always clean UTF-8; decode lossily rather
// than failing the run on a stray byte.
fn read_local(path: &Path, source: &SourceConfig) -> Result<String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(HarvestError::MissingLocalFile {
                path: path.to_path_buf(),
                hint: source.missing_hint.clone().unwrap_or_else(|| {
                    "place the pre-downloaded document at this path and re-run".to_string()
                }),
            })
        }
        Err(e) => Err(HarvestError::Io(e)),
    }
}
