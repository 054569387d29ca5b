//! Weighted P/E Job
//!
//! Scrapes an index's constituent list, resolves market cap and P/E per
//! ticker (individually fallible) and appends the capitalization-weighted
//! average to the per-index history CSV, dated today.
//!
//! A failed scrape or an empty basket means "no data, skip this run" - the
//! previous history rows stay untouched and the run continues.

use crate::jobs::{JobContext, JobResult};
use crate::models::IndexSpec;
use crate::services::{constituent_service, weighted_average};
use crate::store::csv_store;
use chrono::Utc;
use tracing::{error, info, warn};

pub async fn run(ctx: &JobContext, index: &IndexSpec) -> JobResult {
    let Some(source) = &index.constituents else {
        return JobResult::default();
    };

    info!(
        "🧮 Computing weighted P/E for {} ({:?} ratio)",
        index.display_name, source.ratio_source
    );

    let tickers = match ctx.scraper.fetch_tickers(source).await {
        Ok(tickers) => tickers,
        Err(e) => {
            error!("❌ Failed to fetch constituent list for {}: {}", index.display_name, e);
            return JobResult { items_processed: 0, items_failed: 1 };
        }
    };

    let quotes = constituent_service::collect_quotes(
        ctx.fundamentals_provider.as_ref(),
        &tickers,
        source.ratio_source,
    )
    .await;

    let Some(weighted) = weighted_average::aggregate(&quotes) else {
        warn!(
            "No weighted P/E result for {} ({} valid quotes), skipping this run",
            index.display_name,
            quotes.len()
        );
        return JobResult { items_processed: 0, items_failed: 1 };
    };

    info!(
        "{}: {} constituents, total market cap ${:.0}, weighted P/E {:.2}",
        index.display_name,
        quotes.len(),
        weighted.total_market_cap,
        weighted.value
    );

    let today = Utc::now().date_naive();
    match csv_store::append_weighted_pe(&ctx.config.csv_dir, source.history_file, today, weighted.value)
    {
        Ok(path) => {
            info!("✓ Appended weighted P/E to {}", path.display());
            JobResult { items_processed: 1, items_failed: 0 }
        }
        Err(e) => {
            error!(
                "❌ Failed to append {}: {} - nothing written this run",
                source.history_file, e
            );
            JobResult { items_processed: 0, items_failed: 1 }
        }
    }
}
