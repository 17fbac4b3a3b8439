use crate::config::Config;
use crate::errors::AppError;
use crate::models::{ErrorBody, Lead, ScoreRequest};
use std::time::Duration;

/// Generic failure text shown when the server supplies no `detail` field.
pub const GENERIC_SUBMIT_ERROR: &str = "An error occurred";

/// Client for the remote lead-scoring service.
#[derive(Clone)]
pub struct ScoringClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ScoringClient {
    /// Creates a new `ScoringClient`.
    ///
    /// The request timeout and the (default-off) transport retry policy come
    /// from the configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.scoring_api_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    /// Fetches the existing scored leads (`GET /leads`).
    ///
    /// # Returns
    ///
    /// * `Result<Vec<Lead>, AppError>` - The lead list in server order.
    pub async fn fetch_leads(&self) -> Result<Vec<Lead>, AppError> {
        let url = format!("{}/leads", self.base_url);
        tracing::info!("Fetching scored leads from {}", url);

        let mut attempt = 0;
        let response = loop {
            match self.client.get(&url).send().await {
                Ok(response) => break response,
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Lead fetch failed (attempt {}/{}): {}",
                        attempt,
                        self.max_retries,
                        e
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(e) => {
                    return Err(AppError::Fetch(format!("Lead fetch failed: {}", e)));
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Fetch(format!(
                "Lead service returned {}: {}",
                status, error_text
            )));
        }

        let leads: Vec<Lead> = response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to parse lead list: {}", e)))?;

        tracing::info!("Fetched {} scored leads", leads.len());
        Ok(leads)
    }

    /// Submits a draft for scoring (`POST /score`).
    ///
    /// On an HTTP error status the server's `detail` field becomes the
    /// user-facing message; transport failures and missing detail collapse to
    /// the fixed generic text. Retries (when enabled) cover transport errors
    /// only: an error status is a definitive answer, not a transient failure.
    pub async fn score(&self, request: &ScoreRequest) -> Result<Lead, AppError> {
        let url = format!("{}/score", self.base_url);
        tracing::info!("Submitting lead {} for scoring", request.email);

        let mut attempt = 0;
        let response = loop {
            match self.client.post(&url).json(request).send().await {
                Ok(response) => break response,
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Scoring request failed (attempt {}/{}): {}",
                        attempt,
                        self.max_retries,
                        e
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(e) => {
                    tracing::error!("Scoring request failed: {}", e);
                    return Err(AppError::Submission(GENERIC_SUBMIT_ERROR.to_string()));
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| GENERIC_SUBMIT_ERROR.to_string());
            tracing::error!("Scoring service returned {}: {}", status, detail);
            return Err(AppError::Submission(detail));
        }

        let lead: Lead = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse scoring response: {}", e);
            AppError::Submission(GENERIC_SUBMIT_ERROR.to_string())
        })?;

        tracing::info!(
            "Lead {} scored: initial {:.2}, reranked {:.2}",
            lead.email,
            lead.initial_score,
            lead.reranked_score
        );
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = Config {
            scoring_api_url: "https://example.com/".to_string(),
            request_timeout_secs: 30,
            max_retries: 0,
            retry_backoff_ms: 250,
        };
        let client = ScoringClient::new(&config);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://example.com");
    }
}
