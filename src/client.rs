use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::errors::{Result, TradeError};
use crate::models::{TradeInput, TradeQuery, TradeResult};

const USER_AGENT: &str = concat!("poketrade/", env!("CARGO_PKG_VERSION"));

/// Remote service that scores a trade between two creatures.
#[async_trait]
pub trait TradeScorer: Send + Sync + 'static {
    async fn score(&self, input: &TradeInput) -> Result<TradeResult>;
}

// Error body the scoring service sends with 4xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpTradeScorer {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTradeScorer {
    pub fn new(endpoint: Url) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint with the four trade parameters as an encoded query string.
    pub fn request_url(&self, input: &TradeInput) -> Result<Url> {
        let query = serde_qs::to_string(&TradeQuery::from(input))?;
        let mut url = self.endpoint.clone();
        url.set_query(Some(&query));
        Ok(url)
    }
}

#[async_trait]
impl TradeScorer for HttpTradeScorer {
    async fn score(&self, input: &TradeInput) -> Result<TradeResult> {
        let url = self.request_url(input)?;
        debug!(%url, "Requesting trade score");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            return Err(TradeError::Server { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
