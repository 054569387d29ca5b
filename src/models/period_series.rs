use chrono::{Datelike, Duration, Months, NaiveDate};

/// Resampling period length. Weekly periods end on the ISO week's Sunday,
/// monthly on the last calendar day of the month, annual on December 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Weekly,
    Monthly,
    Annual,
}

impl Granularity {
    /// Lowercase label used in output file names and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Annual => "annual",
        }
    }

    /// The period-end date of the period containing `date`.
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Weekly => {
                // Monday = 0 .. Sunday = 6; roll forward to Sunday
                let offset = 6 - date.weekday().num_days_from_monday() as i64;
                date + Duration::days(offset)
            }
            Granularity::Monthly => {
                let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .expect("first of month is always valid");
                first + Months::new(1) - Duration::days(1)
            }
            Granularity::Annual => NaiveDate::from_ymd_opt(date.year(), 12, 31)
                .expect("december 31 is always valid"),
        }
    }
}

/// One row of a resampled series. `rate` is the period-over-period
/// percentage change and is `None` for the first period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodPoint {
    pub period_end: NaiveDate,
    pub value: f64,
    pub rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekly_period_ends_on_sunday() {
        // 2024-01-01 is a Monday
        assert_eq!(Granularity::Weekly.period_end(d(2024, 1, 1)), d(2024, 1, 7));
        assert_eq!(Granularity::Weekly.period_end(d(2024, 1, 5)), d(2024, 1, 7));
        // A Sunday maps to itself
        assert_eq!(Granularity::Weekly.period_end(d(2024, 1, 7)), d(2024, 1, 7));
    }

    #[test]
    fn test_monthly_period_end() {
        assert_eq!(Granularity::Monthly.period_end(d(2024, 2, 10)), d(2024, 2, 29));
        assert_eq!(Granularity::Monthly.period_end(d(2023, 2, 1)), d(2023, 2, 28));
        assert_eq!(Granularity::Monthly.period_end(d(2024, 12, 31)), d(2024, 12, 31));
    }

    #[test]
    fn test_annual_period_end() {
        assert_eq!(Granularity::Annual.period_end(d(2024, 6, 15)), d(2024, 12, 31));
    }
}
