mod app;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};

use points_board::api::ApiClient;
use points_board::config::{read_env_first, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let config = Config::from_env()?;
    let api = ApiClient::new(config.api_base_url.clone(), config.request_timeout)?;

    app::run(config, api).await
}

/// Logs go to a file when `LOG_FILE` is set, otherwise to stderr. The TUI owns
/// stdout, so stderr output is only readable when redirected.
fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "points_board=info".into());

    match read_env_first(&["LOG_FILE"]) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to open log file {path}"))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
