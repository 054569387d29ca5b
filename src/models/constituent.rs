/// Which price/earnings figure to read for an index's constituents.
///
/// The two tracked baskets intentionally differ (S&P 500 uses trailing,
/// Nasdaq-100 forward), so this is per-index configuration rather than a
/// single global choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioSource {
    Trailing,
    Forward,
}

/// A successfully resolved constituent: market cap and ratio are both
/// positive by the time this struct exists, the collector drops the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituentQuote {
    pub ticker: String,
    pub market_cap: f64,
    pub ratio: f64,
}

/// Result of the cap-weighted aggregation, with the total market cap the
/// weights were based on for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedAverage {
    pub value: f64,
    pub total_market_cap: f64,
}
