use crate::{
    error::ServiceError,
    models::{block::BlockRequest, quote::PriceQuote},
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Calls made by the mempool against the block simulator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlocksClient: Send + Sync {
    /// Fetch a fresh price quote
    async fn get_current_price(&self) -> Result<PriceQuote, ServiceError>;

    /// Submit a batch; any non-success status is an error
    async fn simulate_block(&self, request: &BlockRequest) -> Result<(), ServiceError>;
}

/// HTTP client for a running block simulator
#[derive(Debug, Clone)]
pub struct HttpBlocksClient {
    http: Client,
    base_url: String,
}

impl HttpBlocksClient {
    /// Creates a client rooted at `base_url`, e.g. `http://blocks:8080`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlocksClient for HttpBlocksClient {
    async fn get_current_price(&self) -> Result<PriceQuote, ServiceError> {
        let quote = self
            .http
            .get(format!("{}/getCurrentPrice", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<PriceQuote>()
            .await?;
        debug!(gas_price = quote.gas_price, fee = quote.fee, "Fetched price quote");
        Ok(quote)
    }

    async fn simulate_block(&self, request: &BlockRequest) -> Result<(), ServiceError> {
        self.http
            .post(format!("{}/simulateBlock", self.base_url))
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
