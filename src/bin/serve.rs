//! Crop recommendation HTTP service.
//!
//! Loads the classifier and scaler written by `crop-train` once at startup
//! and serves `GET /health` and `POST /predict`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crop_recommender::service::api::build_router;
use crop_recommender::service::config::{self, ServeConfig};
use crop_recommender::service::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_serve_config()?;
    info!(
        listen_addr = %config.listen_addr,
        service = %config.service_name,
        "starting crop recommendation service"
    );

    let state = Arc::new(AppState::from_config(&config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load service configuration from a YAML file or fall back to defaults.
///
/// Checks (in order):
/// 1. First CLI argument as config path
/// 2. `CROP_SERVE_CONFIG` environment variable
/// 3. Default configuration
fn load_serve_config() -> anyhow::Result<ServeConfig> {
    let config_path: Option<PathBuf> = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CROP_SERVE_CONFIG").ok())
        .map(PathBuf::from);

    match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading configuration from file");
            Ok(config::load_config(&path)?)
        }
        None => {
            info!("no config file specified, using defaults");
            Ok(ServeConfig::default())
        }
    }
}
