//! Sequential chart fetching against the astrology API

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::http::{HttpConfig, HttpError, build_client};
use super::types::{ChartFailure, ChartResult, ChartResults};
use crate::birth::BirthPayload;
use crate::charts::ChartSpec;
use crate::config::AstroApiConfig;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("API key missing.")]
    MissingApiKey,

    #[error("HTTP {status}")]
    Http { status: u16, details: String },

    #[error("Request Timeout")]
    Timeout,

    #[error("{0}")]
    Transport(String),

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),
}

impl From<FetchError> for ChartFailure {
    fn from(err: FetchError) -> Self {
        let status_code = match &err {
            FetchError::MissingApiKey => Some(400),
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Timeout => Some(408),
            FetchError::Transport(_) | FetchError::InvalidJson(_) => None,
        };
        let error = err.to_string();
        let details = match err {
            FetchError::Http { details, .. } => Some(details),
            _ => None,
        };

        ChartFailure {
            status_code,
            error,
            details,
        }
    }
}

/// Receives one notification after each chart in a batch
pub trait ProgressReporter: Send + Sync {
    fn on_step(&self, completed: usize, total: usize);
}

impl<F> ProgressReporter for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_step(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Discards progress notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_step(&self, _completed: usize, _total: usize) {}
}

/// Issues one POST per selected chart, strictly in order, pausing between calls
pub struct ChartFetcher {
    client: Client,
    base_url: String,
    call_delay: Duration,
}

impl ChartFetcher {
    pub fn new(config: &AstroApiConfig) -> Result<Self, HttpError> {
        let client = build_client(&HttpConfig::with_timeout(config.request_timeout.into()))?;
        Ok(Self::with_client(
            client,
            &config.base_url,
            config.call_delay.into(),
        ))
    }

    pub fn with_client(client: Client, base_url: &str, call_delay: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            call_delay,
        }
    }

    pub fn call_delay(&self) -> Duration {
        self.call_delay
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Fetch every chart in `charts` and return the complete mapping
    ///
    /// A blank or absent `api_key` short-circuits each chart to a 400 record
    /// without touching the network. A failed chart never aborts the batch.
    pub async fn fetch_all<P>(
        &self,
        api_key: Option<&str>,
        payload: &BirthPayload,
        charts: &[&ChartSpec],
        progress: &P,
    ) -> ChartResults
    where
        P: ProgressReporter + ?Sized,
    {
        let api_key = api_key.map(str::trim).filter(|key| !key.is_empty());
        let total = charts.len();
        let mut results = ChartResults::new();

        for (idx, chart) in charts.iter().enumerate() {
            let outcome = match api_key {
                Some(key) => self.fetch_one(key, chart.endpoint, payload).await,
                None => Err(FetchError::MissingApiKey),
            };

            let result = match outcome {
                Ok(body) => {
                    info!(chart = chart.id, endpoint = chart.endpoint, "Chart fetched");
                    ChartResult::Success(body)
                }
                Err(err) => {
                    warn!(chart = chart.id, endpoint = chart.endpoint, error = %err, "Chart fetch failed");
                    ChartResult::Failure(err.into())
                }
            };
            results.insert(chart.id, result);
            progress.on_step(idx + 1, total);

            // Rate limit only between real requests
            let is_last = idx + 1 == total;
            if api_key.is_some() && !is_last && !self.call_delay.is_zero() {
                tokio::time::sleep(self.call_delay).await;
            }
        }

        results
    }

    /// One POST, no retry
    pub async fn fetch_one(
        &self,
        api_key: &str,
        endpoint: &str,
        payload: &BirthPayload,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "Requesting chart");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                details: error_details(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::InvalidJson(e.to_string()))
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// `message` from a JSON error body, else the raw text
fn error_details(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) if !other.is_null() => other.to_string(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}
