use crate::errors::AppError;
use crate::models::{Granularity, PeriodPoint, PricePoint};
use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode, ToPrimitive};

/// Round to two decimals using round-half-to-even, the same convention the
/// output files have always carried.
pub fn round2(value: f64) -> f64 {
    BigDecimal::from_f64(value)
        .map(|d| d.with_scale_round(2, RoundingMode::HalfEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Resample a daily close series into period-aligned rows.
///
/// The value of each period is the close of the last observation falling
/// inside it, rounded to two decimals before the rate is computed. The rate
/// is the percentage change against the previous period's value, also
/// rounded to two decimals; the first period has no predecessor and keeps
/// `rate = None`.
///
/// Pure and idempotent: no I/O, and the same input always yields identical
/// rows. Empty input yields an empty series. Fails only on inputs that
/// violate the provider contract (unsorted dates, non-finite closes).
pub fn resample(
    prices: &[PricePoint],
    granularity: Granularity,
) -> Result<Vec<PeriodPoint>, AppError> {
    for point in prices {
        if !point.close.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "non-finite close at {}",
                point.date
            )));
        }
    }

    for pair in prices.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(AppError::InvalidInput(format!(
                "prices not sorted ascending at {}",
                pair[1].date
            )));
        }
    }

    // Last observation per period; input order makes this a single pass.
    let mut periods: Vec<(chrono::NaiveDate, f64)> = Vec::new();
    for point in prices {
        let period_end = granularity.period_end(point.date);
        match periods.last_mut() {
            Some(last) if last.0 == period_end => last.1 = point.close,
            _ => periods.push((period_end, point.close)),
        }
    }

    let mut out: Vec<PeriodPoint> = Vec::with_capacity(periods.len());
    let mut prev_value: Option<f64> = None;

    for (period_end, close) in periods {
        let value = round2(close);
        let rate = prev_value.map(|prev| round2((value - prev) / prev * 100.0));
        prev_value = Some(value);

        out.push(PeriodPoint { period_end, value, rate });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn p(y: i32, m: u32, d: u32, close: f64) -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), close)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_input_is_empty_series() {
        for granularity in [Granularity::Weekly, Granularity::Monthly, Granularity::Annual] {
            assert!(resample(&[], granularity).unwrap().is_empty());
        }
    }

    #[test]
    fn test_monthly_takes_last_close_per_month() {
        let prices = vec![
            p(2024, 1, 2, 100.0),
            p(2024, 1, 31, 110.0),
            p(2024, 2, 1, 120.0),
            p(2024, 2, 15, 121.0),
            p(2024, 3, 29, 110.0),
        ];
        let series = resample(&prices, Granularity::Monthly).unwrap();

        assert_eq!(series.len(), 3, "one row per distinct month");
        assert_eq!(series[0].period_end, d(2024, 1, 31));
        assert_eq!(series[0].value, 110.0);
        assert!(series[0].rate.is_none(), "first period has no predecessor");

        assert_eq!(series[1].period_end, d(2024, 2, 29));
        assert_eq!(series[1].value, 121.0);
        assert_eq!(series[1].rate, Some(10.0));

        assert_eq!(series[2].period_end, d(2024, 3, 31));
        assert_eq!(series[2].rate, Some(round2((110.0 - 121.0) / 121.0 * 100.0)));
    }

    #[test]
    fn test_weekly_periods_end_on_sunday() {
        // 2024-01-01 (Mon) .. 2024-01-08 (Mon) span two ISO weeks
        let prices = vec![
            p(2024, 1, 1, 100.0),
            p(2024, 1, 5, 102.0),
            p(2024, 1, 8, 104.04),
        ];
        let series = resample(&prices, Granularity::Weekly).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period_end, d(2024, 1, 7));
        assert_eq!(series[0].value, 102.0);
        assert_eq!(series[1].period_end, d(2024, 1, 14));
        assert_eq!(series[1].rate, Some(2.0));
    }

    #[test]
    fn test_annual_periods_end_on_december_31() {
        let prices = vec![p(2023, 6, 1, 100.0), p(2024, 2, 1, 150.0)];
        let series = resample(&prices, Granularity::Annual).unwrap();

        assert_eq!(series[0].period_end, d(2023, 12, 31));
        assert_eq!(series[1].period_end, d(2024, 12, 31));
        assert_eq!(series[1].rate, Some(50.0));
    }

    #[test]
    fn test_values_rounded_before_rate() {
        // As f64, 100.005 sits just below its midpoint (rounds to 100.00)
        // and 100.015 just above its own (rounds to 100.02); the rate must
        // be computed from the rounded values.
        let prices = vec![p(2024, 1, 31, 100.005), p(2024, 2, 29, 100.015)];
        let series = resample(&prices, Granularity::Monthly).unwrap();

        assert_eq!(series[0].value, 100.0);
        assert_eq!(series[1].value, 100.02);
        assert_eq!(series[1].rate, Some(round2((100.02 - 100.0) / 100.0 * 100.0)));
        assert_eq!(series[1].rate, Some(0.02));
    }

    #[test]
    fn test_unsorted_input_is_rejected() {
        let prices = vec![p(2024, 2, 1, 100.0), p(2024, 1, 1, 100.0)];
        assert!(matches!(
            resample(&prices, Granularity::Monthly),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_duplicate_dates_are_rejected() {
        let prices = vec![p(2024, 1, 1, 100.0), p(2024, 1, 1, 101.0)];
        assert!(matches!(
            resample(&prices, Granularity::Monthly),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_close_is_rejected() {
        let prices = vec![p(2024, 1, 1, f64::NAN)];
        assert!(matches!(
            resample(&prices, Granularity::Monthly),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let prices: Vec<PricePoint> = (1..=28)
            .map(|day| p(2024, 1 + (day % 3), day, 100.0 + day as f64 * 0.37))
            .collect();
        let mut sorted = prices.clone();
        sorted.sort_by_key(|p| p.date);
        sorted.dedup_by_key(|p| p.date);

        let a = resample(&sorted, Granularity::Weekly).unwrap();
        let b = resample(&sorted, Granularity::Weekly).unwrap();
        assert_eq!(a, b);
    }
}
