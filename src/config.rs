use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use url::Url;

pub const DEFAULT_TRADE_ENDPOINT: &str = "http://127.0.0.1:5000/trade";
const DEFAULT_LOG_FILE: &str = "poketrade.log";
const DEFAULT_LOG_FILTER: &str = "poketrade=info,warn";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub trade_endpoint: Url,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_endpoint =
            get("TRADE_ENDPOINT").unwrap_or_else(|| DEFAULT_TRADE_ENDPOINT.to_string());
        let trade_endpoint = Url::parse(raw_endpoint.trim())
            .with_context(|| format!("TRADE_ENDPOINT is not a valid URL: {raw_endpoint}"))?;
        if !matches!(trade_endpoint.scheme(), "http" | "https") {
            bail!(
                "TRADE_ENDPOINT must use http or https, got {}",
                trade_endpoint.scheme()
            );
        }

        let log_file = get("POKETRADE_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let log_filter = get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            trade_endpoint,
            log_file,
            log_filter,
        })
    }
}
