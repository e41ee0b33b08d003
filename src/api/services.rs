use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, info};

use super::{
    error::ApiError,
    models::{FetchRequest, FetchResponse, GeocodeRequest},
    state::AppState,
};
use crate::birth::{BirthInput, BirthPayload};
use crate::charts::{self, CHARTS};
use crate::report::Artifacts;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Chart table with default-selection flags (GET /charts)
pub async fn list_charts() -> impl IntoResponse {
    Json(CHARTS)
}

/// Run one fetch batch and return both downloads (POST /charts/fetch)
///
/// ## Flow:
/// 1. Validate the birth document with the load rules
/// 2. Resolve the chart selection (default selection when absent)
/// 3. Fetch every chart sequentially with the configured delay
/// 4. Render raw JSON name, readable report and file names
///
/// Per-chart failures are part of `results`; they never fail the request.
pub async fn fetch_charts(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<FetchResponse>, ApiError> {
    let birth = BirthInput::from_value(&request.birth)?;

    let selection = match &request.charts {
        Some(ids) => charts::resolve_selection(ids.as_slice())?,
        None => charts::default_selection(),
    };

    let api_key = request
        .api_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| state.config.astro_api.api_key.clone());

    info!(name = %birth.name, charts = selection.len(), "Fetching charts");

    let progress = |completed: usize, total: usize| debug!(completed, total, "Chart batch progress");
    let results = state
        .fetcher
        .fetch_all(
            api_key.as_deref(),
            &BirthPayload::from(&birth),
            &selection,
            &progress,
        )
        .await;
    state.metrics.batch_completed(&results);

    let artifacts = Artifacts::build(&birth, &results)?;

    Ok(Json(FetchResponse {
        results,
        report: artifacts.text,
        json_name: artifacts.json_name,
        text_name: artifacts.text_name,
    }))
}

/// Resolve a place name to coordinates (POST /geocode)
pub async fn geocode(
    State(state): State<AppState>,
    Json(request): Json<GeocodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.geocoder.resolve(&request.place).await;
    state.metrics.geocode_lookup(result.is_ok());

    Ok(Json(result?))
}
