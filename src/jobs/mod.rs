//! Per-run driver jobs.
//!
//! Each job is one parameterized pass over a tracked index, replacing the
//! per-index scripts this tool grew out of:
//!
//! - `index_change_job` - fetch daily closes, resample, persist change CSVs,
//!   report summary statistics and a DCA return estimate
//! - `weighted_pe_job` - scrape constituents, resolve valuations, append the
//!   cap-weighted P/E to the history CSV
//!
//! Jobs log their failures and report counts; they do not abort the run.

pub mod index_change_job;
pub mod weighted_pe_job;

use crate::config::AppConfig;
use crate::external::constituents::ConstituentScraper;
use crate::external::fundamentals::FundamentalsProvider;
use crate::external::price_provider::PriceProvider;
use std::sync::Arc;

/// Everything a job needs for one run.
pub struct JobContext {
    pub config: AppConfig,
    pub price_provider: Arc<dyn PriceProvider>,
    pub fundamentals_provider: Arc<dyn FundamentalsProvider>,
    pub scraper: ConstituentScraper,
}

#[derive(Debug, Default)]
pub struct JobResult {
    pub items_processed: usize,
    pub items_failed: usize,
}
