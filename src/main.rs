mod config;
mod errors;
mod external;
mod jobs;
mod logging;
mod models;
mod services;
mod store;

use crate::config::AppConfig;
use crate::external::constituents::ConstituentScraper;
use crate::external::fundamentals::YahooFundamentalsProvider;
use crate::external::yahoo::YahooProvider;
use crate::jobs::JobContext;
use crate::logging::{init_logging, LoggingConfig};
use crate::models::index::tracked_indices;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env();
    info!("🚀 indexwatch run starting, CSV output at {}", config.csv_dir.display());

    let ctx = JobContext {
        price_provider: Arc::new(YahooProvider::new(config.http_timeout)),
        fundamentals_provider: Arc::new(YahooFundamentalsProvider::new(config.http_timeout)),
        scraper: ConstituentScraper::new(config.http_timeout),
        config,
    };

    let indices = tracked_indices();
    let mut processed = 0;
    let mut failed = 0;

    for index in &indices {
        match jobs::index_change_job::run(&ctx, index).await {
            Ok(result) => {
                processed += result.items_processed;
                failed += result.items_failed;
            }
            Err(e) => {
                error!("❌ Change job for {} aborted: {}", index.display_name, e);
                failed += 1;
            }
        }
    }

    for index in &indices {
        let result = jobs::weighted_pe_job::run(&ctx, index).await;
        processed += result.items_processed;
        failed += result.items_failed;
    }

    info!("Run finished: {} outputs written, {} failures", processed, failed);

    Ok(())
}
