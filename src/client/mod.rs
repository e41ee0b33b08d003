//! Outbound HTTP collaborators
//!
//! Both external services are called through one shared reqwest client per
//! collaborator with fixed timeouts. Nothing here retries: a timeout or HTTP
//! error is terminal for that one call and is surfaced to the caller.

pub mod fetcher;
pub mod geocode;
pub mod http;
pub mod types;

pub use fetcher::{ChartFetcher, FetchError, NoProgress, ProgressReporter};
pub use geocode::{GeoLocation, GeocodeError, Geocoder};
pub use http::{HttpConfig, HttpError};
pub use types::{ChartFailure, ChartResult, ChartResults};
