//! Weather AUS rain dashboard - backend server

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use rain_dashboard_backend::{create_app, services::ArtifactStore, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rain_dashboard=debug,rain_dashboard_backend=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting Weather AUS rain dashboard");
    tracing::info!("Environment: {}", config.environment);

    // Load fitted artifacts
    let store = ArtifactStore::new(config.artifacts.dir.clone());
    tracing::info!("Loading artifacts from {}", store.dir().display());
    let predictor = store
        .load()
        .with_context(|| format!("loading artifacts from {}", store.dir().display()))?;

    if !config.dataset.path.is_file() {
        tracing::warn!(
            "Dataset {} not found; analysis requests will fail",
            config.dataset.path.display()
        );
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        predictor: Arc::new(predictor),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
