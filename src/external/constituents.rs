use crate::errors::AppError;
use crate::models::ConstituentSource;
use regex::Regex;
use std::time::Duration;
use tracing::info;

pub struct ConstituentScraper {
    client: reqwest::Client,
    user_agent: String,
}

impl ConstituentScraper {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            user_agent: "indexwatch/0.1 (index statistics; contact via repository)".to_string(),
        }
    }

    /// Scrape the constituent ticker list from the source's Wikipedia page.
    ///
    /// Symbols come from the configured column of the `constituents` table;
    /// `.` is mapped to `-` for Yahoo compatibility (BRK.B -> BRK-B).
    pub async fn fetch_tickers(&self, source: &ConstituentSource) -> Result<Vec<String>, AppError> {
        info!("Fetching constituent list from {}", source.url);

        let response = self.client
            .get(source.url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::External(format!("Failed to fetch constituent page: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited);
        }

        if !response.status().is_success() {
            return Err(AppError::External(format!(
                "Constituent page returned status: {}",
                response.status()
            )));
        }

        let body = response.text().await
            .map_err(|e| AppError::External(format!("Failed to read response: {}", e)))?;

        let tickers = parse_constituents_table(&body, source.symbol_column)?;

        info!("Found {} constituent tickers", tickers.len());
        Ok(tickers)
    }
}

/// Extract ticker symbols from the table with id="constituents".
fn parse_constituents_table(html: &str, symbol_column: usize) -> Result<Vec<String>, AppError> {
    let start = html
        .find("id=\"constituents\"")
        .ok_or_else(|| AppError::Parse("constituents table not found".into()))?;
    let rest = &html[start..];
    let end = rest
        .find("</table>")
        .ok_or_else(|| AppError::Parse("constituents table is not closed".into()))?;
    let table = &rest[..end];

    let row_re = Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("static regex");
    let cell_re = Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("static regex");
    let tag_re = Regex::new(r"<[^>]+>").expect("static regex");

    let mut tickers = Vec::new();

    for row in row_re.captures_iter(table) {
        let cells: Vec<String> = cell_re
            .captures_iter(&row[1])
            .map(|c| tag_re.replace_all(&c[1], "").trim().to_string())
            .collect();

        // Header rows have no <td> cells
        let Some(symbol) = cells.get(symbol_column) else { continue };
        if symbol.is_empty() {
            continue;
        }

        tickers.push(symbol.replace('.', "-"));
    }

    if tickers.is_empty() {
        return Err(AppError::Parse("constituents table has no symbol rows".into()));
    }

    Ok(tickers)
}
