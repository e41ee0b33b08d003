use std::fs;

use jyotish_data::birth::{BirthInput, BirthPayload};
use jyotish_data::charts::{self, CHARTS, ChartSpec};
use jyotish_data::client::{ChartFetcher, Geocoder};
use jyotish_data::config::Config;
use jyotish_data::report::Artifacts;
use tracing::{info, warn};

use crate::cli::FetchArgs;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub fn list_charts() {
    for chart in CHARTS {
        let marker = if chart.default_selected { "*" } else { " " };
        println!("{} {:<26} {}", marker, chart.id, chart.endpoint);
    }
}

pub fn show_config(config: &Config) -> Result<(), AnyError> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub async fn geocode(config: &Config, place: &str) -> Result<(), AnyError> {
    let geocoder = Geocoder::new(&config.geocode)?;
    let location = geocoder.resolve(place).await?;

    println!("{:.4}, {:.4}  {}", location.latitude, location.longitude, location.label);
    Ok(())
}

pub async fn fetch(config: &Config, args: FetchArgs) -> Result<(), AnyError> {
    let raw = fs::read_to_string(&args.birth)
        .map_err(|e| format!("failed to read {}: {}", args.birth.display(), e))?;
    let mut birth = BirthInput::from_json(extract_birth_json(&raw))?;

    // A failed lookup leaves the saved coordinates in place
    if let Some(place) = &args.place {
        let geocoder = Geocoder::new(&config.geocode)?;
        match geocoder.resolve(place).await {
            Ok(location) => {
                info!(label = %location.label, "Coordinates set");
                birth = birth.with_coordinates(location.latitude, location.longitude);
            }
            Err(err) => warn!(error = %err, "Keeping saved coordinates"),
        }
    }

    let selection: Vec<&ChartSpec> = if args.all {
        CHARTS.iter().collect()
    } else if args.charts.is_empty() {
        charts::default_selection()
    } else {
        charts::resolve_selection(args.charts.as_slice())?
    };

    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.astro_api.api_key.clone());
    if api_key.is_none() {
        warn!("No astrology API key configured; set ASTRO_API_KEY or pass --api-key");
    }

    info!(
        charts = selection.len(),
        delay = %config.astro_api.call_delay,
        "Fetching charts"
    );

    let fetcher = ChartFetcher::new(&config.astro_api)?;
    let progress = |completed: usize, total: usize| info!("[{}/{}] chart done", completed, total);
    let results = fetcher
        .fetch_all(api_key.as_deref(), &BirthPayload::from(&birth), &selection, &progress)
        .await;

    let failed = results.failed();
    if failed > 0 {
        warn!(failed, total = results.len(), "Some charts failed; see ERROR lines in the summary");
    }

    let artifacts = Artifacts::build(&birth, &results)?;
    let out_dir = args.out.unwrap_or_else(|| config.output.dir.clone());
    let (json_path, text_path) = artifacts.write_to(&out_dir)?;

    println!("{}", json_path.display());
    println!("{}", text_path.display());
    Ok(())
}

/// Accept a bare birth JSON document or a whole readable summary
fn extract_birth_json(raw: &str) -> &str {
    jyotish_data::report::footer_json(raw).unwrap_or(raw)
}
