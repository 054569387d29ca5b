use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for a run. The CSV output directory is explicit
/// configuration rather than a hardcoded module constant.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_dir: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            csv_dir: std::env::var("CSV_DIR")
                .unwrap_or_else(|_| "data/csv".to_string())
                .into(),
            http_timeout: Duration::from_secs(
                std::env::var("HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
