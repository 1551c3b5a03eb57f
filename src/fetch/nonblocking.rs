//! Async fetcher; backoff waits yield to the tokio scheduler.

use std::time::{Duration, Instant};

use reqwest::Client;

use crate::fetch::{AttemptStep, FetchOutcome, RetryPolicy};

/// Async resilient fetcher.
///
/// Attempts within one call are strictly sequential: attempt N+1 is issued
/// only after attempt N's response and backoff wait have completed.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    api_key: Option<String>,
}

impl Fetcher {
    /// Create a fetcher with an explicit per-attempt timeout and optional
    /// Semantic Scholar API key (sent as `x-api-key` on every attempt).
    pub fn new(timeout: Duration, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Issue a GET against `url` with the given query parameters, retrying
    /// per `policy`. Always returns a terminal [`FetchOutcome`]; callers must
    /// not loop further.
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        policy: &RetryPolicy,
    ) -> FetchOutcome {
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            let mut request = self.client.get(url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(ref key) = self.api_key {
                request = request.header("x-api-key", key);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    tracing::debug!(url, attempt, error = %err, "transport failure");
                    return FetchOutcome::TransportError(err.to_string());
                }
            };

            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(url, attempt, error = %err, "failed to read body");
                    return FetchOutcome::TransportError(err.to_string());
                }
            };

            match policy.evaluate(attempt, status, body, started.elapsed()) {
                AttemptStep::Terminal(outcome) => return outcome,
                AttemptStep::Backoff(delay) => {
                    tracing::warn!(
                        url,
                        status,
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        backoff = ?delay,
                        "retryable status, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
