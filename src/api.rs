//! HTTP client for the leaderboard backend.
//!
//! [`LeaderboardApi`] is the seam the controller talks to;
//! [`HttpLeaderboardApi`] is the browser implementation on top of
//! `gloo-net`.

use crate::config;
use crate::model::{HealthStatus, Leaderboard, Metric};
use gloo_net::http::{Request, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Parameters of one `/leaderboard` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub kingdom: String,
    pub metric: Metric,
    /// `YYYY-MM-DD` or `"latest"`.
    pub dt: String,
    pub limit: u32,
}

impl LeaderboardQuery {
    /// Query-string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("kingdom", self.kingdom.clone()),
            ("metric", self.metric.as_str().to_string()),
            ("dt", self.dt.clone()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx leaderboard response; `message` is already user-facing.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Health check failed ({0})")]
    HealthCheck(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Backend operations used by the dashboard.
///
/// Futures are awaited on the browser's single thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait LeaderboardApi {
    async fn fetch_leaderboard(&self, query: &LeaderboardQuery) -> Result<Leaderboard, ApiError>;

    async fn fetch_health(&self) -> Result<HealthStatus, ApiError>;
}

/// Message for a failed response.
///
/// A JSON body with a non-blank `error` field uses that field, and scalars
/// are printed as-is. A body that is not JSON, or is JSON `null`, is shown
/// verbatim. Anything else gets a generic status message.
pub fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("API error ({})", status);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => body.to_string(),
        Ok(json) => json
            .get("error")
            .and_then(error_field_text)
            .unwrap_or_else(fallback),
        Err(_) if body.is_empty() => fallback(),
        Err(_) => body.to_string(),
    }
}

/// Text of a usable `error` field; `null`, `false`, `0` and `""` carry none.
fn error_field_text(field: &Value) -> Option<String> {
    match field {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// `gloo-net` implementation talking to a configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpLeaderboardApi {
    base_url: String,
}

impl HttpLeaderboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for the build-time configured backend.
    pub fn from_config() -> Self {
        Self::new(config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn leaderboard_url(&self) -> String {
        format!("{}/leaderboard", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl LeaderboardApi for HttpLeaderboardApi {
    async fn fetch_leaderboard(&self, query: &LeaderboardQuery) -> Result<Leaderboard, ApiError> {
        let url = self.leaderboard_url();
        debug!("Fetching leaderboard: {} {:?}", url, query);

        let response = Request::get(&url)
            .query(query.query_pairs())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            // An unreadable body is treated like an empty one
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!("Leaderboard request failed ({}): {}", status, message);
            return Err(ApiError::Http { status, message });
        }

        decode(response).await
    }

    async fn fetch_health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.health_url();
        debug!("Checking API health: {}", url);

        let response = Request::get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::HealthCheck(response.status()));
        }

        decode(response).await
    }
}
