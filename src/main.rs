//! Ambix Certify - Certificate Issuance and Verification Service
//!
//! Loads `config.toml`, opens the JSON-file stores, and serves the HTTP
//! API until SIGINT/SIGTERM.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ambix_certify::configs::AppConfig;
use ambix_certify::webserver::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        data_dir = %config.storage.data_dir.display(),
        admins = config.admin.emails.len(),
        "configuration loaded"
    );

    let state = AppState::new(config).context("Failed to initialize application state")?;
    webserver::serve(state).await
}
