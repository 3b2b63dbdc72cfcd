use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod checker;
mod client;
mod config;
mod errors;
mod models;
mod notify;
mod ui;

use client::HttpTradeScorer;
use config::AppConfig;
use ui::TerminalApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // The terminal is owned by the UI, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("🚀 Trade checker starting against {}", config.trade_endpoint);

    let scorer = Arc::new(HttpTradeScorer::new(config.trade_endpoint.clone())?);
    let mut app = TerminalApp::new(scorer);
    app.run().await
}
