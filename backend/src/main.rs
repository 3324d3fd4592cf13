use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use creatix_backend::{config::Config, router::build_router, state::AppState, validation::schemas};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "creatix_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        addr = %config.socket_addr(),
        cors_allow_origins = ?config.cors_allow_origins,
        max_body_bytes = config.max_body_bytes,
        "Loaded configuration from environment/.env"
    );

    schemas::verify_all().context("Request schemas are malformed")?;
    tracing::info!(count = schemas::all().len(), "Request schemas verified");

    let addr = config.socket_addr();
    let app = build_router(AppState::in_memory(config));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
