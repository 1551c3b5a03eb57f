//! Retry policy shared by both fetcher execution modes.

use std::time::Duration;

use crate::fetch::FetchOutcome;

/// Statuses the upstream contract treats as transient.
///
/// Everything else, 4xx and 5xx alike, is terminal on first sight.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Configuration for retry behavior with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Backoff unit; attempt index N waits `base_delay * 2^N` before retrying
    pub base_delay: Duration,
    /// Overall deadline across attempts and backoff waits; once a backoff
    /// would cross it, the sequence is abandoned with a terminal outcome
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
            max_elapsed: Duration::from_secs(120),
        }
    }
}

impl RetryPolicy {
    /// Policy used for paper search.
    pub fn search() -> Self {
        Self {
            max_attempts: 5,
            ..Self::default()
        }
    }

    /// Policy used for per-paper metadata lookup.
    pub fn metadata() -> Self {
        Self::default()
    }

    /// Policy used for fetching the paper HTML page.
    pub fn page() -> Self {
        Self::default()
    }

    /// Backoff before the attempt that follows `attempt_index` (0-based).
    pub fn backoff_delay(&self, attempt_index: u32) -> Duration {
        // 2^n growth; the shift is clamped so a misconfigured budget cannot
        // overflow the multiplier.
        self.base_delay.saturating_mul(1u32 << attempt_index.min(20))
    }

    /// Classify the response observed on `attempt_index` and decide the next
    /// step. `elapsed` is the time spent on the whole sequence so far.
    pub fn evaluate(
        &self,
        attempt_index: u32,
        status: u16,
        body: String,
        elapsed: Duration,
    ) -> AttemptStep {
        if (200..300).contains(&status) {
            return AttemptStep::Terminal(FetchOutcome::Success { status, body });
        }

        if !is_retryable_status(status) {
            return AttemptStep::Terminal(FetchOutcome::HttpError { status, body });
        }

        let delay = self.backoff_delay(attempt_index);
        let attempts_left = attempt_index + 1 < self.max_attempts;
        let within_deadline = elapsed + delay <= self.max_elapsed;

        if attempts_left && within_deadline {
            AttemptStep::Backoff(delay)
        } else if status == 429 {
            AttemptStep::Terminal(FetchOutcome::RateLimited)
        } else {
            AttemptStep::Terminal(FetchOutcome::HttpError { status, body })
        }
    }
}

/// What a fetcher should do after one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStep {
    /// Wait this long, then issue the next attempt
    Backoff(Duration),
    /// Stop and hand this outcome to the caller
    Terminal(FetchOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "{} should retry", status);
        }
        for status in [200, 301, 400, 401, 403, 404, 418, 501] {
            assert!(!is_retryable_status(status), "{} should not retry", status);
        }
    }

    #[test]
    fn test_backoff_grows_as_powers_of_two() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(100),
            ..RetryPolicy::default()
        };

        assert_eq!(policy.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(400));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn test_success_is_terminal() {
        let policy = RetryPolicy::search();
        let step = policy.evaluate(0, 200, "ok".to_string(), Duration::ZERO);
        assert_eq!(
            step,
            AttemptStep::Terminal(FetchOutcome::Success {
                status: 200,
                body: "ok".to_string()
            })
        );
    }

    #[test]
    fn test_non_retryable_status_is_terminal_on_first_attempt() {
        let policy = RetryPolicy::search();
        let step = policy.evaluate(0, 404, "missing".to_string(), Duration::ZERO);
        assert_eq!(
            step,
            AttemptStep::Terminal(FetchOutcome::HttpError {
                status: 404,
                body: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_429_backs_off_while_budget_remains() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_elapsed: Duration::from_secs(60),
        };

        assert_eq!(
            policy.evaluate(0, 429, String::new(), Duration::ZERO),
            AttemptStep::Backoff(Duration::from_millis(50))
        );
        assert_eq!(
            policy.evaluate(1, 429, String::new(), Duration::from_millis(50)),
            AttemptStep::Backoff(Duration::from_millis(100))
        );
        // Third attempt is the last one
        assert_eq!(
            policy.evaluate(2, 429, String::new(), Duration::from_millis(150)),
            AttemptStep::Terminal(FetchOutcome::RateLimited)
        );
    }

    #[test]
    fn test_5xx_exhaustion_keeps_status_and_body() {
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(10),
            max_elapsed: Duration::from_secs(60),
        };

        assert_eq!(
            policy.evaluate(1, 503, "unavailable".to_string(), Duration::from_millis(10)),
            AttemptStep::Terminal(FetchOutcome::HttpError {
                status: 503,
                body: "unavailable".to_string()
            })
        );
    }

    #[test]
    fn test_deadline_cuts_retries_short() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            max_elapsed: Duration::from_secs(2),
        };

        // Plenty of attempts left, but the next backoff would cross the
        // deadline.
        assert_eq!(
            policy.evaluate(2, 429, String::new(), Duration::from_secs(1)),
            AttemptStep::Terminal(FetchOutcome::RateLimited)
        );
    }
}
