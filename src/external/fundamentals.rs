use crate::external::price_provider::PriceProviderError;
use crate::models::{ConstituentQuote, RatioSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Per-ticker valuation lookup: market cap plus a P/E-style ratio.
///
/// One bad ticker must not abort a basket, so callers are expected to treat
/// each call as individually fallible and skip failures.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    async fn fetch_quote(
        &self,
        ticker: &str,
        ratio_source: RatioSource,
    ) -> Result<ConstituentQuote, PriceProviderError>;
}

pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
}

impl YahooFundamentalsProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "summaryDetail")]
    summary_detail: SummaryDetail,
}

#[derive(Debug, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "marketCap")]
    market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

// Yahoo wraps numbers as { "raw": 123.4, "fmt": "123.40" }
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[async_trait]
impl FundamentalsProvider for YahooFundamentalsProvider {
    async fn fetch_quote(
        &self,
        ticker: &str,
        ratio_source: RatioSource,
    ) -> Result<ConstituentQuote, PriceProviderError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{ticker}?modules=summaryDetail"
        );

        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }

        let body = resp
            .json::<QuoteSummaryResponse>()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        let detail = body.quote_summary.result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| PriceProviderError::BadResponse("missing result".into()))?
            .summary_detail;

        let market_cap = detail.market_cap
            .and_then(|v| v.raw)
            .ok_or_else(|| PriceProviderError::BadResponse("missing market cap".into()))?;

        let ratio = match ratio_source {
            RatioSource::Trailing => detail.trailing_pe,
            RatioSource::Forward => detail.forward_pe,
        }
        .and_then(|v| v.raw)
        .ok_or_else(|| PriceProviderError::BadResponse("missing PE ratio".into()))?;

        Ok(ConstituentQuote {
            ticker: ticker.to_string(),
            market_cap,
            ratio,
        })
    }
}
