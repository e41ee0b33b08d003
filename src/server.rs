use jyotish_data::api::{self, state::AppState};
use jyotish_data::config::Config;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(config: Config, address: SocketAddr) -> Result<(), AnyError> {
    if config.astro_api.api_key.is_none() {
        tracing::warn!("No ASTRO_API_KEY set; requests must carry their own api_key");
    }

    let state = AppState::new(config)?;
    let app = api::router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "Jyotish API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
