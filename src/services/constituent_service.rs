use crate::external::fundamentals::FundamentalsProvider;
use crate::models::{ConstituentQuote, RatioSource};
use tracing::{debug, info};

/// Resolve market cap and ratio for every ticker in the basket.
///
/// Each ticker is individually fallible: lookup errors and non-positive
/// values are dropped, never escalated, so one bad symbol cannot abort the
/// batch. Progress is logged every `PROGRESS_EVERY` tickers, matching the
/// pace the runs have always reported at.
pub async fn collect_quotes(
    provider: &dyn FundamentalsProvider,
    tickers: &[String],
    ratio_source: RatioSource,
) -> Vec<ConstituentQuote> {
    const PROGRESS_EVERY: usize = 50;

    info!("Fetching market cap and P/E for {} tickers", tickers.len());

    let mut quotes = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for (i, ticker) in tickers.iter().enumerate() {
        match provider.fetch_quote(ticker, ratio_source).await {
            Ok(quote) if quote.market_cap > 0.0 && quote.ratio > 0.0 => {
                quotes.push(quote);
            }
            Ok(_) => {
                debug!("Dropping {}: non-positive market cap or ratio", ticker);
                failed.push(ticker.clone());
            }
            Err(e) => {
                debug!("Dropping {}: {}", ticker, e);
                failed.push(ticker.clone());
            }
        }

        if (i + 1) % PROGRESS_EVERY == 0 {
            info!(
                "Processed {}/{} tickers, {} valid so far",
                i + 1,
                tickers.len(),
                quotes.len()
            );
        }
    }

    info!(
        "Resolved {} of {} tickers ({} dropped)",
        quotes.len(),
        tickers.len(),
        failed.len()
    );

    quotes
}
