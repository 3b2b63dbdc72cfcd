use reqwest::StatusCode;
use uuid::Uuid;

use crate::notify::Notice;

pub const MISSING_NAMES: &str = "Please enter both Pokémon names.";
const FETCH_FAILED: &str = "Failed to fetch trade data. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error: {status}")]
    Server {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Query encoding error: {0}")]
    Query(#[from] serde_qs::Error),
}

impl TradeError {
    /// Logs the failure and turns it into the alert shown to the user.
    pub fn into_notice(self, request_id: Option<Uuid>) -> Notice {
        match &self {
            TradeError::Validation(msg) => {
                tracing::warn!(?request_id, "Trade check rejected: {}", msg);
                Notice::warning(msg.as_str())
            }
            TradeError::Server {
                status,
                message: Some(msg),
            } => {
                tracing::error!(?request_id, %status, "Error fetching trade data: {}", msg);
                Notice::error(format!(
                    "Failed to fetch trade data: {msg}. Please try again."
                ))
            }
            _ => {
                tracing::error!(?request_id, "Error fetching trade data: {:?}", self);
                Notice::error(FETCH_FAILED)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TradeError>;
