//! Rail search HTTP client.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::upstream::{UpstreamError, build_http_client, read_envelope};

use super::types::{AvailabilityRow, RawTrain, SeatAvailabilityRequest, TrainSearchRequest};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 6;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Trait for the rail search API.
///
/// This abstraction allows the rail adapter to be tested with mock data.
pub trait RailApi: Send + Sync {
    /// Trains running between two stations on a date.
    fn trains_between(
        &self,
        request: &TrainSearchRequest,
    ) -> impl Future<Output = Result<Vec<RawTrain>, UpstreamError>> + Send;

    /// Seat availability for one train and class.
    fn seat_availability(
        &self,
        request: &SeatAvailabilityRequest,
    ) -> impl Future<Output = Result<Vec<AvailabilityRow>, UpstreamError>> + Send;
}

/// Configuration for the rail API client.
#[derive(Debug, Clone)]
pub struct RailClientConfig {
    /// Base URL of the rail API
    pub base_url: String,
    /// API key; without one every call reports `NotConfigured`
    pub api_key: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RailClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Rail API client.
#[derive(Debug, Clone)]
pub struct RailClient {
    http: reqwest::Client,
    base_url: String,
    configured: bool,
    semaphore: Arc<Semaphore>,
}

impl RailClient {
    pub fn new(config: RailClientConfig) -> Result<Self, UpstreamError> {
        let http = build_http_client(config.api_key.as_deref(), config.timeout_secs)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            configured: config.api_key.is_some(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    async fn get<T: serde::de::DeserializeOwned + Default>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        if !self.configured {
            return Err(UpstreamError::NotConfigured(
                "rail API key is not set".to_string(),
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

        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(params).send().await?;

        let payload: Option<T> = read_envelope(response).await?;
        Ok(payload.unwrap_or_default())
    }
}

impl RailApi for RailClient {
    async fn trains_between(
        &self,
        request: &TrainSearchRequest,
    ) -> Result<Vec<RawTrain>, UpstreamError> {
        let date = request.date.format("%Y-%m-%d").to_string();
        self.get(
            "/trains/between",
            &[
                ("fromStationCode", request.from_station.as_str()),
                ("toStationCode", request.to_station.as_str()),
                ("dateOfJourney", date.as_str()),
            ],
        )
        .await
    }

    async fn seat_availability(
        &self,
        request: &SeatAvailabilityRequest,
    ) -> Result<Vec<AvailabilityRow>, UpstreamError> {
        let date = request.date.format("%Y-%m-%d").to_string();
        self.get(
            "/trains/seat-availability",
            &[
                ("trainNo", request.train_number.as_str()),
                ("classType", request.class_code.as_str()),
                ("fromStationCode", request.from_station.as_str()),
                ("toStationCode", request.to_station.as_str()),
                ("date", date.as_str()),
                ("quota", request.quota.as_str()),
            ],
        )
        .await
    }
}
