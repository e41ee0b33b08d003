//! Request and response bodies of the HTTP surface
//!
//! `POST /charts/fetch` takes the same birth-details document the readable
//! report embeds in its footer:
//!
//! ```json
//! {
//!   "birth": {
//!     "name": "Test", "year": 2000, "month": 1, "date": 1,
//!     "hours": 12, "minutes": 0, "seconds": 0,
//!     "latitude": 0.0, "longitude": 0.0, "timezone": 5.5,
//!     "observation_point": "topocentric", "ayanamsha": "lahiri"
//!   },
//!   "charts": ["D1", "D9 (Navamsa Chart)"]
//! }
//! ```
//!
//! Omitting `charts` fetches the default selection. `api_key` overrides the
//! server's configured key for that one request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ChartResults;

#[derive(Debug, Deserialize, Clone)]
pub struct FetchRequest {
    /// Validated with the birth-details load rules
    pub birth: Value,
    #[serde(default)]
    pub charts: Option<Vec<String>>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub results: ChartResults,
    pub report: String,
    pub json_name: String,
    pub text_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodeRequest {
    pub place: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}
