// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the tourism dataset
// Usage: cargo run --features api --bin api_server

use std::net::SocketAddr;
use tourism_trends::{create_router, AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "tourism_trends=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let config = AppConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  DATA_PATH: {}", config.data_path.display());
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  TOP_STATES: {}", config.top_states);
    tracing::info!("  ALTERNATIVES_TOP_N: {}", config.alternatives);

    let port = config.port;

    // A missing dataset is fatal: report and stop before serving
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e);
        }
    };
    tracing::info!("Application state initialized ({} rows)", state.data.len());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
