//! Place name → coordinates via a forward-geocoding service

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::http::{HttpConfig, HttpError, build_client};
use crate::config::GeocodeConfig;

#[derive(Debug, Error, PartialEq)]
pub enum GeocodeError {
    #[error("Please enter a place name.")]
    EmptyInput,

    #[error("Could not find coordinates for '{0}'.")]
    NoMatch(String),

    #[error("Geocode error: {0}")]
    Request(String),
}

/// First geocoder hit for a place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

pub struct Geocoder {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl Geocoder {
    pub fn new(config: &GeocodeConfig) -> Result<Self, HttpError> {
        let client = build_client(&HttpConfig::with_timeout(config.request_timeout.into()))?;
        Ok(Self::with_client(client, &config.url, config.api_key.clone()))
    }

    pub fn with_client(client: Client, url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Resolve `place` with a single uncached request
    pub async fn resolve(&self, place: &str) -> Result<GeoLocation, GeocodeError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(GeocodeError::EmptyInput);
        }

        debug!(place, "Geocoding place");

        let mut query: Vec<(&str, &str)> = vec![("q", place), ("limit", "1")];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.as_str()));
        }

        let result = async {
            let response = self
                .client
                .get(&self.url)
                .query(&query)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| GeocodeError::Request(e.to_string()))?;

            let body: Value = response
                .json()
                .await
                .map_err(|e| GeocodeError::Request(e.to_string()))?;

            parse_first_hit(place, &body)
        }
        .await;

        if let Err(err) = &result {
            warn!(place, error = %err, "Geocoding failed");
        }
        result
    }
}

/// Take the first entry of a geocoder response; later hits are ignored
pub fn parse_first_hit(place: &str, body: &Value) -> Result<GeoLocation, GeocodeError> {
    let hit = match body.as_array().and_then(|hits| hits.first()) {
        Some(hit) => hit,
        None => return Err(GeocodeError::NoMatch(place.to_string())),
    };

    let latitude = coordinate(hit, "lat")?;
    let longitude = coordinate(hit, "lon")?;
    let label = hit
        .get("display_name")
        .and_then(Value::as_str)
        .filter(|label| !label.is_empty())
        .unwrap_or(place)
        .to_string();

    Ok(GeoLocation {
        latitude,
        longitude,
        label,
    })
}

fn coordinate(hit: &Value, key: &str) -> Result<f64, GeocodeError> {
    let value = hit
        .get(key)
        .ok_or_else(|| GeocodeError::Request(format!("missing '{}' in response", key)))?;

    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .ok_or_else(|| GeocodeError::Request(format!("'{}' is not a number: {}", key, value)))
}
