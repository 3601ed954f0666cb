//! Client for the leaderboards scores API

use super::models::LeaderboardScores;
use crate::config::{Config, RetryConfig};
use log::{debug, warn};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Error type for failures while fetching the leaderboard scores
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request failed to send or the body failed to read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API responded with a non success status code
    #[error("Unexpected status code {0}")]
    Status(StatusCode),
    /// The response body did not match the expected structure
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether another attempt could succeed where this one failed
    fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Status(status) => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::Client(_) | Self::Parse(_) => false,
        }
    }
}

/// Client for requesting the scores of a single fixed leaderboard
pub struct ScoresClient {
    /// The underlying HTTP client
    http: Client,
    /// URL of the leaderboard scores resource
    url: String,
    /// Basic authorization header value if credentials are configured
    authorization: Option<String>,
    /// Policy for retrying failed requests
    retry: RetryConfig,
}

impl ScoresClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let http = builder.build().map_err(FetchError::Client)?;

        let authorization = config.credentials.authorization();
        if authorization.is_none() {
            warn!("No service account credentials configured, requests will be unauthorized");
        }

        Ok(Self {
            http,
            url: config.leaderboard.scores_url(),
            authorization,
            retry: config.retry,
        })
    }

    /// The URL scores are requested from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the leaderboard scores. Failed attempts are retried
    /// according to the retry policy when the failure is retryable
    pub async fn fetch_scores(&self) -> Result<LeaderboardScores, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once().await {
                Ok(scores) => return Ok(scores),
                Err(err) if err.is_retryable() && attempt < self.retry.attempts => {
                    let delay = backoff_delay(&self.retry, attempt);
                    attempt += 1;
                    warn!(
                        "Leaderboard request failed, retrying in {}ms ({}/{}): {}",
                        delay.as_millis(),
                        attempt,
                        self.retry.attempts,
                        err
                    );
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Makes a single request to the scores resource
    async fn fetch_once(&self) -> Result<LeaderboardScores, FetchError> {
        debug!("GET request to url {}", self.url);

        let mut request = self
            .http
            .get(&self.url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        let scores: LeaderboardScores = serde_json::from_slice(&bytes)?;

        debug!(
            "Received {} leaderboard entries (Offset: {:?}, Limit: {:?}, Total: {:?})",
            scores.results.len(),
            scores.offset,
            scores.limit,
            scores.total
        );

        Ok(scores)
    }
}

/// Delay before the retry following the provided zero based attempt
fn backoff_delay(retry: &RetryConfig, attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_millis(retry.delay_ms.saturating_mul(factor))
}
