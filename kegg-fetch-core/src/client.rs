//! HTTP client for the KEGG REST `get` operation

use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::KeggSettings;
use crate::entry::{EntryError, EntryKind};
use crate::projection::{RecordProjector, StructuredRecord};

/// Failures raised before any text reaches the parser
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    InvalidId(#[from] EntryError),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("KEGG returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("KEGG returned an empty body for {url}")]
    EmptyBody { url: String },
}

/// Fetches raw flat-file text one entry at a time
#[derive(Debug, Clone)]
pub struct KeggClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl KeggClient {
    pub fn new(settings: &KeggSettings) -> Result<Self, FetchError> {
        let timeout = Duration::from_secs(settings.timeout);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Client { source })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// `{base_url}/get/{prefix}:{id}`
    pub fn entry_url(&self, kind: EntryKind, id: &str) -> String {
        format!("{}/get/{}:{}", self.base_url, kind.prefix(), id)
    }

    /// Fetch the raw text of one entry
    pub async fn fetch(&self, kind: EntryKind, id: &str) -> Result<String, FetchError> {
        let id = kind.validate_id(id)?;
        let url = self.entry_url(kind, &id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| self.request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Error fetching {} {}: status {}", kind, id, status);
            return Err(FetchError::Status { url, status: status.as_u16() });
        }

        let body = response.text().await.map_err(|e| self.request_error(&url, e))?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody { url });
        }

        info!("Fetched {} {} ({} bytes)", kind, id, body.len());
        Ok(body)
    }

    fn request_error(&self, url: &str, source: reqwest::Error) -> FetchError {
        error!("Request to {} failed: {}", url, source);
        if source.is_timeout() {
            FetchError::Timeout { url: url.to_string(), timeout: self.timeout }
        } else {
            FetchError::Network { url: url.to_string(), source }
        }
    }

    /// Fetch one entry and project it with `projector`
    pub async fn fetch_record(
        &self,
        id: &str,
        projector: &RecordProjector,
    ) -> anyhow::Result<StructuredRecord> {
        let kind = projector.schema().kind();
        let text = self.fetch(kind, id).await?;
        projector
            .project_text(&text)
            .with_context(|| format!("Failed to project {} {}", kind, id))
    }
}
