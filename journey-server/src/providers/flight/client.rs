//! Flight search HTTP client.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::upstream::{UpstreamError, build_http_client, read_envelope};

use super::types::{FlightSearchRequest, FlightSearchResponse};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Trait for the flight search API.
pub trait FlightApi: Send + Sync {
    fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> impl Future<Output = Result<FlightSearchResponse, UpstreamError>> + Send;
}

/// Configuration for the flight search client.
#[derive(Debug, Clone)]
pub struct FlightClientConfig {
    /// Base URL of the flight API
    pub base_url: String,
    /// API key; without one every search reports `NotConfigured`
    pub api_key: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FlightClientConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
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

/// Flight search API client.
#[derive(Debug, Clone)]
pub struct FlightClient {
    http: reqwest::Client,
    base_url: String,
    configured: bool,
    semaphore: Arc<Semaphore>,
}

impl FlightClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FlightClientConfig) -> Result<Self, UpstreamError> {
        let http = build_http_client(config.api_key.as_deref(), config.timeout_secs)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            configured: config.api_key.is_some(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Search itineraries for one origin/destination/date.
    pub async fn search(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<FlightSearchResponse, UpstreamError> {
        if !self.configured {
            return Err(UpstreamError::NotConfigured(
                "flight API key is not set".to_string(),
            ));
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| UpstreamError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/flights/search", self.base_url);
        let date = request.date.format("%Y-%m-%d").to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("originCode", request.origin.as_str()),
                ("destinationCode", request.destination.as_str()),
                ("date", date.as_str()),
                ("currency", request.currency.as_str()),
                ("cabinClass", request.cabin_class),
            ])
            .send()
            .await?;

        let payload: Option<FlightSearchResponse> = read_envelope(response).await?;
        Ok(payload.unwrap_or_default())
    }
}

impl FlightApi for FlightClient {
    async fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<FlightSearchResponse, UpstreamError> {
        self.search(request).await
    }
}
