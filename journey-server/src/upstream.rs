//! Shared plumbing for the external HTTP APIs (location lookup, flight
//! search, rail search).
//!
//! All three APIs answer with a JSON envelope `{status, message, data}` and
//! authenticate with an `x-apikey` header.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Errors from an upstream HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 2xx but flagged the request as failed in its envelope
    #[error("request rejected: {0}")]
    Rejected(String),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No credential or endpoint configured
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Call exceeded its time budget
    #[error("timed out")]
    Timeout,
}

impl UpstreamError {
    /// Short machine-readable category used in warning events.
    pub fn failure_kind(&self) -> &'static str {
        match self {
            UpstreamError::NotConfigured(_) => "not_configured",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Http(e) if e.is_timeout() => "timeout",
            _ => "upstream_error",
        }
    }
}

/// Response envelope shared by the upstream APIs.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: Option<bool>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload; `status: false` is an error, missing data is `None`.
    pub fn into_data(self) -> Result<Option<T>, UpstreamError> {
        if self.status == Some(false) {
            return Err(UpstreamError::Rejected(
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        Ok(self.data)
    }
}

/// Build a reqwest client with the API key header and a request timeout.
pub fn build_http_client(
    api_key: Option<&str>,
    timeout_secs: u64,
) -> Result<reqwest::Client, UpstreamError> {
    let mut headers = HeaderMap::new();

    if let Some(key) = api_key {
        let value = HeaderValue::from_str(key).map_err(|_| UpstreamError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-apikey"), value);
    }

    let http = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    Ok(http)
}

/// Check the status of a response and decode its JSON envelope.
pub async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, UpstreamError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(UpstreamError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(UpstreamError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Api {
            status: status.as_u16(),
            message: body.chars().take(500).collect(),
        });
    }

    let body = response.text().await?;
    decode_envelope(&body)
}

/// Decode a JSON envelope body.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>, UpstreamError> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;
    envelope.into_data()
}
