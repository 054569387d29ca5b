use crate::models::{ConstituentQuote, WeightedAverage};

/// Capitalization-weighted mean of the quotes' ratio.
///
/// Quotes are pre-filtered by the collector (market cap and ratio both
/// positive), so the only degenerate cases left are an empty basket and a
/// zero total market cap; both mean "no result", not zero.
pub fn aggregate(quotes: &[ConstituentQuote]) -> Option<WeightedAverage> {
    if quotes.is_empty() {
        return None;
    }

    let total_market_cap: f64 = quotes.iter().map(|q| q.market_cap).sum();
    if total_market_cap == 0.0 {
        return None;
    }

    let value = quotes
        .iter()
        .map(|q| q.market_cap / total_market_cap * q.ratio)
        .sum();

    Some(WeightedAverage { value, total_market_cap })
}
