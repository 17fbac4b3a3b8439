use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scoring_api_url: String,
    pub request_timeout_secs: u64,
    /// Transport-level retries for fetch/scoring requests. 0 disables retry,
    /// which preserves the service's historical behavior.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            scoring_api_url: std::env::var("SCORING_API_URL")
                .map_err(|_| anyhow::anyhow!("SCORING_API_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("SCORING_API_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("SCORING_API_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a whole number"))?,
            max_retries: std::env::var("MAX_RETRIES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_RETRIES must be a whole number"))?,
            retry_backoff_ms: std::env::var("RETRY_BACKOFF_MS")
                .unwrap_or_else(|_| "250".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RETRY_BACKOFF_MS must be a whole number"))?,
        };

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Scoring API URL: {}", config.scoring_api_url);
        tracing::debug!("Request timeout: {}s", config.request_timeout_secs);
        if config.max_retries > 0 {
            tracing::info!(
                "Transport retries enabled: {} attempts, {}ms backoff",
                config.max_retries,
                config.retry_backoff_ms
            );
        }

        Ok(config)
    }
}
