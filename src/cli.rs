use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jyotish")]
#[command(about = "Vedic divisional chart data for AI workflows", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available divisional charts (* marks the default selection)
    Charts,
    /// Resolve a place name to latitude/longitude
    Geocode(GeocodeArgs),
    /// Fetch charts for a saved birth-details JSON file and write both downloads
    Fetch(FetchArgs),
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Print the effective configuration (API keys are never shown)
    Config,
}

#[derive(clap::Args, Debug)]
pub struct GeocodeArgs {
    /// Place name, e.g. "New York, USA"
    pub place: String,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Birth-details JSON (the block under "BIRTH JSON:" in a summary works too)
    #[arg(long)]
    pub birth: PathBuf,

    /// Chart to fetch: full name, short code (D9) or endpoint; repeatable
    #[arg(long = "chart", value_name = "CHART")]
    pub charts: Vec<String>,

    /// Fetch all 21 charts
    #[arg(long, conflicts_with = "charts")]
    pub all: bool,

    /// Look up coordinates for this place before fetching
    #[arg(long)]
    pub place: Option<String>,

    /// Astrology API key (overrides ASTRO_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Output directory (overrides output.dir)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}
