//! Blocking fetcher; backoff waits occupy the calling thread.
//!
//! Callers that must stay responsive (e.g. a web handler) should run this on
//! a worker thread, typically via `tokio::task::spawn_blocking`.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use crate::fetch::{AttemptStep, FetchOutcome, RetryPolicy};

/// Blocking resilient fetcher with the same outcomes as [`crate::fetch::Fetcher`].
#[derive(Debug)]
pub struct BlockingFetcher {
    client: Client,
    api_key: Option<String>,
}

impl BlockingFetcher {
    /// Create a fetcher with an explicit per-attempt timeout and optional
    /// Semantic Scholar API key.
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

    /// Issue a GET against `url`, retrying per `policy`, sleeping the calling
    /// thread between attempts. Always returns a terminal [`FetchOutcome`].
    pub fn get(&self, url: &str, query: &[(&str, String)], policy: &RetryPolicy) -> FetchOutcome {
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

            let response = match request.send() {
                Ok(response) => response,
                Err(err) => {
                    tracing::debug!(url, attempt, error = %err, "transport failure");
                    return FetchOutcome::TransportError(err.to_string());
                }
            };

            let status = response.status().as_u16();
            let body = match response.text() {
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
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}
