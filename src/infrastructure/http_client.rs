//! Outbound HTTP client with bounded timeouts and retries.

use reqwest::{Client, Response, redirect::Policy};
use std::time::Duration;
use tokio_retry::Retry;

/// Total request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Attempts made before the last error is returned.
pub const MAX_ATTEMPTS: usize = 3;

/// Base delay; attempt `n` waits `n * RETRY_STEP` before retrying.
pub const RETRY_STEP: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed after {attempts} attempts: {source}")]
    Request {
        url: String,
        attempts: usize,
        #[source]
        source: reqwest::Error,
    },
}

/// GET-only client used for health probes and other outbound checks.
///
/// Redirects are followed, non-2xx statuses count as failures and every
/// failure is retried with a linear back-off.
#[derive(Debug, Clone)]
pub struct SafeHttpClient {
    client: Client,
    max_attempts: usize,
    retry_step: Duration,
}

impl SafeHttpClient {
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_policy(MAX_ATTEMPTS, RETRY_STEP)
    }

    pub fn with_policy(max_attempts: usize, retry_step: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(Policy::limited(10))
            .build()
            .map_err(HttpClientError::Build)?;

        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
            retry_step,
        })
    }

    /// Performs a GET request, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Request`] with the last error once all
    /// attempts are exhausted.
    pub async fn get(&self, url: &str) -> Result<Response, HttpClientError> {
        let strategy = backoff(self.retry_step, self.max_attempts);

        Retry::spawn(strategy, || async {
            let result = self
                .client
                .get(url)
                .send()
                .await
                .and_then(Response::error_for_status);

            if let Err(e) = &result {
                tracing::warn!(url, error = %e, "Outbound request failed");
            }
            result
        })
        .await
        .map_err(|source| HttpClientError::Request {
            url: url.to_string(),
            attempts: self.max_attempts,
            source,
        })
    }
}

/// Delays between attempts: `step`, `2 * step`, ...
fn backoff(step: Duration, max_attempts: usize) -> impl Iterator<Item = Duration> {
    (1..max_attempts as u32).map(move |n| step * n)
}
