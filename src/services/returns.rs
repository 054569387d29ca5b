use crate::models::PeriodPoint;

/// Fixed amount invested per period in the DCA estimate.
const UNIT_INVESTMENT: f64 = 10_000.0;

/// Naive dollar-cost-averaging return over the last `periods` rows.
///
/// Buys `UNIT_INVESTMENT` worth at each of the last N period values, with
/// the price scaled by `fee_adjustment`, then values the accumulated units
/// at the final period's value. Fewer than N periods truncates to what
/// exists; an empty series has no estimate.
pub fn estimate_dca_return(
    series: &[PeriodPoint],
    periods: usize,
    fee_adjustment: f64,
) -> Option<f64> {
    if series.is_empty() || periods == 0 {
        return None;
    }

    let window = &series[series.len().saturating_sub(periods)..];
    let last_value = series.last()?.value;

    let units: f64 = window
        .iter()
        .map(|p| UNIT_INVESTMENT / (p.value * fee_adjustment))
        .sum();

    let invested = window.len() as f64 * UNIT_INVESTMENT;
    Some((last_value * units - invested) / invested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Vec<PeriodPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| PeriodPoint {
                period_end: NaiveDate::from_ymd_opt(2024, 1 + i as u32, 1).unwrap(),
                value,
                rate: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_series_has_no_estimate() {
        assert!(estimate_dca_return(&[], 12, 1.0).is_none());
    }

    #[test]
    fn test_single_period_reduces_to_fee_drag() {
        // One buy at V*f valued at V: return is 1/f - 1 regardless of V.
        let f = 1.0 - 0.0015 + 0.0062;
        let result = estimate_dca_return(&series(&[3200.0]), 1, f).unwrap();
        assert!((result - (1.0 / f - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_flat_prices_without_fees_return_zero() {
        let result = estimate_dca_return(&series(&[100.0, 100.0, 100.0]), 3, 1.0).unwrap();
        assert!(result.abs() < 1e-12);
    }

    #[test]
    fn test_rising_prices_give_positive_return() {
        let result = estimate_dca_return(&series(&[100.0, 110.0, 121.0]), 3, 1.0).unwrap();
        assert!(result > 0.0);
        // units = 100 + 90.909.. + 82.644..; value at 121
        let units = 10_000.0 / 100.0 + 10_000.0 / 110.0 + 10_000.0 / 121.0;
        let expected = (121.0 * units - 30_000.0) / 30_000.0;
        assert!((result - expected).abs() < 1e-12);
    }

    #[test]
    fn test_window_truncates_to_available_periods() {
        let short = estimate_dca_return(&series(&[100.0, 200.0]), 12, 1.0).unwrap();
        let exact = estimate_dca_return(&series(&[100.0, 200.0]), 2, 1.0).unwrap();
        assert_eq!(short, exact);
    }
}
