use crate::models::{Granularity, RatioSource};

/// Where to scrape an index's constituent tickers and how to value them.
#[derive(Debug, Clone)]
pub struct ConstituentSource {
    /// Wikipedia page holding the `constituents` table.
    pub url: &'static str,
    /// Zero-based column of the ticker symbol in that table.
    pub symbol_column: usize,
    pub ratio_source: RatioSource,
    /// History CSV file name, relative to the configured output directory.
    pub history_file: &'static str,
}

/// A tracked market index.
#[derive(Debug, Clone)]
pub struct IndexSpec {
    /// Short key used in output file names (e.g. "sp500").
    pub key: &'static str,
    /// Yahoo Finance ticker (e.g. "^GSPC").
    pub ticker: &'static str,
    pub display_name: &'static str,
    pub granularities: &'static [Granularity],
    /// Fee/slippage adjustment applied to prices in the DCA estimate.
    pub fee_adjustment: f64,
    pub constituents: Option<ConstituentSource>,
}

/// The static catalogue of indices this tool tracks.
pub fn tracked_indices() -> Vec<IndexSpec> {
    vec![
        IndexSpec {
            key: "sp500",
            ticker: "^GSPC",
            display_name: "S&P 500",
            granularities: &[Granularity::Weekly, Granularity::Monthly, Granularity::Annual],
            fee_adjustment: 1.0 - 0.0002 + 0.0134,
            constituents: Some(ConstituentSource {
                url: "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies",
                symbol_column: 0,
                ratio_source: RatioSource::Trailing,
                history_file: "sp500_weighted_pe_history.csv",
            }),
        },
        IndexSpec {
            key: "nasdaq",
            ticker: "^IXIC",
            display_name: "Nasdaq Composite",
            granularities: &[Granularity::Weekly, Granularity::Monthly],
            fee_adjustment: 1.0 - 0.0015 + 0.0062,
            // The P/E basket is Nasdaq-100, not the composite; its symbol
            // sits in the second column of the Wikipedia table.
            constituents: Some(ConstituentSource {
                url: "https://en.wikipedia.org/wiki/Nasdaq-100",
                symbol_column: 1,
                ratio_source: RatioSource::Forward,
                history_file: "nasdaq100_weighted_pe_history.csv",
            }),
        },
        IndexSpec {
            key: "hsi",
            ticker: "^HSI",
            display_name: "Hang Seng",
            granularities: &[Granularity::Weekly, Granularity::Monthly],
            fee_adjustment: 1.0,
            constituents: None,
        },
    ]
}

impl IndexSpec {
    /// Output file name for a resampled change series.
    pub fn change_file(&self, granularity: Granularity) -> String {
        format!("{}_{}_change.csv", self.key, granularity.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_file_names() {
        let indices = tracked_indices();
        let sp500 = indices.iter().find(|i| i.key == "sp500").unwrap();
        assert_eq!(sp500.change_file(Granularity::Monthly), "sp500_monthly_change.csv");
        assert_eq!(sp500.change_file(Granularity::Weekly), "sp500_weekly_change.csv");
        assert_eq!(sp500.change_file(Granularity::Annual), "sp500_annual_change.csv");
    }

    #[test]
    fn test_catalogue_ratio_sources_stay_divergent() {
        // The two baskets deliberately read different P/E figures.
        let indices = tracked_indices();
        let sp500 = indices.iter().find(|i| i.key == "sp500").unwrap();
        let nasdaq = indices.iter().find(|i| i.key == "nasdaq").unwrap();
        assert_eq!(sp500.constituents.as_ref().unwrap().ratio_source, RatioSource::Trailing);
        assert_eq!(nasdaq.constituents.as_ref().unwrap().ratio_source, RatioSource::Forward);
    }
}
