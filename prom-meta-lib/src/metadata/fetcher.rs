//! HTTP retrieval of the metadata envelope.

use super::{MetadataResponse, MetadataSet};
use reqwest::StatusCode;
use url::Url;

pub(super) const LOG_TARGET: &str = "   fetcher";

/// Path of the metadata endpoint, relative to the server's base URL.
pub const METADATA_PATH: &str = "/api/v1/metadata";

/// Failure to obtain a metadata set from the server.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200 OK.
    #[error("wrong status: {status}")]
    Status { status: StatusCode },

    /// The body is not a valid metadata envelope.
    #[error("unable to decode the metadata response")]
    Decode(#[source] serde_json::Error),
}

/// Retrieves metric metadata from a Prometheus server.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl Fetcher {
    /// Create a fetcher for the server rooted at `base_url`.
    pub fn new(base_url: &Url) -> crate::Result<Self> {
        let client = reqwest::Client::builder().user_agent("prom-meta").build()?;

        Ok(Self {
            client,
            endpoint: metadata_endpoint(base_url),
        })
    }

    /// The full URL that [`Self::fetch`] requests.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue a single GET against the metadata endpoint and decode the result.
    pub async fn fetch(&self) -> Result<MetadataSet, FetchError> {
        log::info!(target: LOG_TARGET, "Fetching metric metadata from {}", self.endpoint);

        let resp = self.client.get(&self.endpoint).send().await.map_err(|source| FetchError::Transport {
            url: self.endpoint.clone(),
            source,
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            log::debug!(target: LOG_TARGET, "Server answered {status}");
            return Err(FetchError::Status { status });
        }

        let body = resp.bytes().await.map_err(|source| FetchError::Transport {
            url: self.endpoint.clone(),
            source,
        })?;

        let response: MetadataResponse = serde_json::from_slice(&body).map_err(FetchError::Decode)?;
        if response.status != "success" {
            log::warn!(target: LOG_TARGET, "Server reported status '{}' for the metadata request", response.status);
        }

        log::debug!(
            target: LOG_TARGET,
            "Received metadata for {} metric(s), {} entries",
            response.data.len(),
            response.data.entry_count()
        );

        Ok(response.data)
    }
}

fn metadata_endpoint(base_url: &Url) -> String {
    format!("{}{METADATA_PATH}", base_url.as_str().trim_end_matches('/'))
}
