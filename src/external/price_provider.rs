use crate::models::PricePoint;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Full available daily-close history for `ticker`, sorted ascending
    /// by date. Days without a close are skipped.
    async fn fetch_daily_history(
        &self,
        ticker: &str,
    ) -> Result<Vec<PricePoint>, PriceProviderError>;
}
