//! Location lookup API client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::upstream::{UpstreamError, build_http_client, read_envelope};

use super::resolver::LocationLookup;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// One candidate returned by the lookup API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub code: String,
}

/// Configuration for a location lookup client.
#[derive(Debug, Clone)]
pub struct LocationClientConfig {
    /// Full URL of the search endpoint; the query goes in `?query=`.
    pub search_url: String,
    /// API key for the `x-apikey` header
    pub api_key: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LocationClientConfig {
    /// Create a new config for the given search endpoint.
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            api_key: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for a location lookup API.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: reqwest::Client,
    search_url: String,
    semaphore: Arc<Semaphore>,
}

impl LocationClient {
    /// Create a new client.
    pub fn new(config: LocationClientConfig) -> Result<Self, UpstreamError> {
        let http = build_http_client(config.api_key.as_deref(), config.timeout_secs)?;

        Ok(Self {
            http,
            search_url: config.search_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Search candidates for a free-text place name.
    pub async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, UpstreamError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| UpstreamError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(&self.search_url)
            .query(&[("query", query)])
            .send()
            .await?;

        let candidates: Option<Vec<LocationCandidate>> = read_envelope(response).await?;
        Ok(candidates.unwrap_or_default())
    }
}

impl LocationLookup for LocationClient {
    async fn lookup(&self, query: &str) -> Result<Vec<LocationCandidate>, UpstreamError> {
        self.search(query).await
    }
}
