//! Index Change Job
//!
//! Fetches the full daily close history for one tracked index, resamples it
//! at each configured granularity, writes the change CSVs and logs the rate
//! summary plus a 12-period dollar-cost-averaging estimate for the monthly
//! series.
//!
//! # Error Handling
//!
//! - A failed fetch aborts this index only; the run moves on
//! - A persistence failure means "nothing written this run" for that file
//! - A resampling failure is a provider-contract violation and fails the
//!   job immediately

use crate::errors::AppError;
use crate::jobs::{JobContext, JobResult};
use crate::models::{Granularity, IndexSpec};
use crate::services::{resampler, returns, summary};
use crate::store::csv_store;
use tracing::{error, info, warn};

/// Periods in the dollar-cost-averaging estimate logged for monthly series.
const DCA_PERIODS: usize = 12;

pub async fn run(ctx: &JobContext, index: &IndexSpec) -> Result<JobResult, AppError> {
    info!("📈 Updating change series for {} ({})", index.display_name, index.ticker);

    let prices = match ctx.price_provider.fetch_daily_history(index.ticker).await {
        Ok(prices) => prices,
        Err(e) => {
            error!("❌ Failed to fetch history for {}: {}", index.ticker, e);
            return Ok(JobResult { items_processed: 0, items_failed: 1 });
        }
    };

    if prices.is_empty() {
        warn!("No price data returned for {}, skipping this run", index.ticker);
        return Ok(JobResult { items_processed: 0, items_failed: 1 });
    }

    info!(
        "Fetched {} daily closes for {} ({} .. {})",
        prices.len(),
        index.ticker,
        prices[0].date,
        prices[prices.len() - 1].date
    );

    let mut result = JobResult::default();

    for &granularity in index.granularities {
        // Contract violations here are not recoverable, fail the job.
        let series = resampler::resample(&prices, granularity)?;

        let file_name = index.change_file(granularity);
        match csv_store::write_change_series(&ctx.config.csv_dir, &file_name, index.ticker, &series)
        {
            Ok(path) => {
                info!("✓ Wrote {} rows to {}", series.len(), path.display());
                result.items_processed += 1;
            }
            Err(e) => {
                error!("❌ Failed to write {}: {} - nothing written this run", file_name, e);
                result.items_failed += 1;
                continue;
            }
        }

        if let Some(stats) = summary::summarize(&series) {
            info!(
                "{} {} change: avg {:.2}% | positive {:.1}% | peak {:.2}% on {} | trough {:.2}% on {}",
                index.display_name,
                granularity.label(),
                stats.avg_rate,
                stats.positive_pct,
                stats.max_rate,
                stats.max_rate_date,
                stats.min_rate,
                stats.min_rate_date,
            );
        }

        if granularity == Granularity::Monthly {
            if let Some(dca) = returns::estimate_dca_return(&series, DCA_PERIODS, index.fee_adjustment)
            {
                info!(
                    "{}: {}-month DCA return estimate {:.2}%",
                    index.display_name,
                    DCA_PERIODS,
                    dca * 100.0
                );
            }
        }
    }

    Ok(result)
}
