use crate::models::PeriodPoint;
use chrono::NaiveDate;

/// Rate statistics over a resampled series, for the run report.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    /// Number of periods carrying a rate (the first period carries none).
    pub rated_periods: usize,
    pub avg_rate: f64,
    pub max_rate: f64,
    pub max_rate_date: NaiveDate,
    pub min_rate: f64,
    pub min_rate_date: NaiveDate,
    /// Share of rated periods with a positive rate, in percent.
    pub positive_pct: f64,
}

/// Summarize the rate column of a period series.
///
/// Returns `None` when no period carries a rate (empty or single-row
/// series), since there is nothing to report.
pub fn summarize(series: &[PeriodPoint]) -> Option<SeriesSummary> {
    let rated: Vec<(&PeriodPoint, f64)> = series
        .iter()
        .filter_map(|p| p.rate.map(|r| (p, r)))
        .collect();

    if rated.is_empty() {
        return None;
    }

    let count = rated.len();
    let avg_rate = rated.iter().map(|(_, r)| r).sum::<f64>() / count as f64;

    let (max_point, max_rate) = rated
        .iter()
        .fold(rated[0], |best, &cur| if cur.1 > best.1 { cur } else { best });
    let (min_point, min_rate) = rated
        .iter()
        .fold(rated[0], |worst, &cur| if cur.1 < worst.1 { cur } else { worst });

    let positive = rated.iter().filter(|(_, r)| *r > 0.0).count();

    Some(SeriesSummary {
        rated_periods: count,
        avg_rate,
        max_rate,
        max_rate_date: max_point.period_end,
        min_rate,
        min_rate_date: min_point.period_end,
        positive_pct: positive as f64 / count as f64 * 100.0,
    })
}
