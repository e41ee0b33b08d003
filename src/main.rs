mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use jyotish_data::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Charts => commands::list_charts(),
        Commands::Config => commands::show_config(&config)?,
        Commands::Geocode(args) => commands::geocode(&config, &args.place).await?,
        Commands::Fetch(args) => commands::fetch(&config, args).await?,
        Commands::Serve(args) => {
            let address = args.address.unwrap_or(config.server.bind_addr);
            server::run(config, address).await?
        }
    }

    Ok(())
}
