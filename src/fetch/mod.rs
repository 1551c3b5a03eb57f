//! Resilient HTTP fetching with bounded retry and exponential backoff.
//!
//! The fetcher comes in two execution modes with identical outcomes:
//!
//! - [`Fetcher`]: async, backoff waits yield to the tokio scheduler
//! - [`BlockingFetcher`]: synchronous, backoff waits occupy the calling thread
//!
//! Both modes drive the same [`RetryPolicy`] state machine: attempt counting,
//! status classification, backoff growth, and terminal-outcome mapping live
//! in one place, and the two fetchers differ only in HTTP client and wait
//! primitive.

mod blocking;
mod nonblocking;
mod policy;

pub use blocking::BlockingFetcher;
pub use nonblocking::Fetcher;
pub use policy::{is_retryable_status, AttemptStep, RetryPolicy};

/// Terminal result of a fetch, produced only after the retry budget is
/// consumed or a non-retryable failure is observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response
    Success { status: u16, body: String },
    /// Upstream answered 429 on the final attempt
    RateLimited,
    /// Non-retryable status, or a retryable 5xx that outlived the budget
    HttpError { status: u16, body: String },
    /// Connection, DNS, timeout, or malformed-response failure; never retried
    TransportError(String),
}

impl FetchOutcome {
    /// Whether this outcome carries a usable response body.
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}
