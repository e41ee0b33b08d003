use std::sync::Arc;

use crate::client::{ChartFetcher, Geocoder, HttpError};
use crate::config::Config;
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: Arc<ChartFetcher>,
    pub geocoder: Arc<Geocoder>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Build both outbound clients from configuration
    pub fn new(config: Config) -> Result<Self, HttpError> {
        let fetcher = ChartFetcher::new(&config.astro_api)?;
        let geocoder = Geocoder::new(&config.geocode)?;
        Ok(Self::from_parts(config, fetcher, geocoder))
    }

    pub fn from_parts(config: Config, fetcher: ChartFetcher, geocoder: Geocoder) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            geocoder: Arc::new(geocoder),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
