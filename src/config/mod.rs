//! Configuration for the tool layer.
//!
//! Everything the fetchers and operations need is carried explicitly in
//! [`ToolConfig`]; nothing reads the environment after construction. The
//! `Default` impl picks up `SEMANTIC_SCHOLAR_API_KEY` once, and a TOML file
//! can override individual fields.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::fetch::RetryPolicy;

/// Semantic Scholar Graph API base URL.
pub const SEMANTIC_API_BASE: &str = "https://api.semanticscholar.org/graph/v1";

/// Semantic Scholar site origin, used to resolve site-relative PDF links and
/// to synthesize paper page URLs.
pub const SEMANTIC_SITE_BASE: &str = "https://www.semanticscholar.org";

/// Configuration shared by both tool execution modes.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Graph API base URL (overridable for tests against a stub server)
    pub api_base: String,
    /// Site origin for paper pages and relative link resolution
    pub site_base: String,
    /// Optional API key for higher rate limits, sent as `x-api-key`
    pub api_key: Option<String>,
    /// Result limit for the search operation
    pub search_limit: usize,
    /// Per-attempt HTTP timeout
    pub timeout: Duration,
    /// Retry policy for the search operation
    pub search_retry: RetryPolicy,
    /// Retry policy for the metadata operation
    pub metadata_retry: RetryPolicy,
    /// Retry policy for the paper page fetch
    pub page_retry: RetryPolicy,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            api_base: SEMANTIC_API_BASE.to_string(),
            site_base: SEMANTIC_SITE_BASE.to_string(),
            api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
            search_limit: 10,
            timeout: Duration::from_secs(10),
            search_retry: RetryPolicy::search(),
            metadata_retry: RetryPolicy::metadata(),
            page_retry: RetryPolicy::page(),
        }
    }
}

impl ToolConfig {
    /// Load the default configuration with overrides from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let overrides: FileConfig = toml::from_str(&raw)?;
        Ok(Self::default().apply(overrides))
    }

    fn apply(mut self, overrides: FileConfig) -> Self {
        if let Some(api_base) = overrides.api_base {
            self.api_base = api_base;
        }
        if let Some(site_base) = overrides.site_base {
            self.site_base = site_base;
        }
        if let Some(api_key) = overrides.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(limit) = overrides.search_limit {
            self.search_limit = limit;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }

        if let Some(retry) = overrides.retry {
            if let Some(ms) = retry.base_delay_ms {
                let base = Duration::from_millis(ms);
                self.search_retry.base_delay = base;
                self.metadata_retry.base_delay = base;
                self.page_retry.base_delay = base;
            }
            if let Some(secs) = retry.max_elapsed_secs {
                let max = Duration::from_secs(secs);
                self.search_retry.max_elapsed = max;
                self.metadata_retry.max_elapsed = max;
                self.page_retry.max_elapsed = max;
            }
            if let Some(n) = retry.search_attempts {
                self.search_retry.max_attempts = n;
            }
            if let Some(n) = retry.metadata_attempts {
                self.metadata_retry.max_attempts = n;
            }
            if let Some(n) = retry.page_attempts {
                self.page_retry.max_attempts = n;
            }
        }

        self
    }
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// TOML-file override shape; every field optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base: Option<String>,
    site_base: Option<String>,
    api_key: Option<String>,
    search_limit: Option<usize>,
    timeout_secs: Option<u64>,
    retry: Option<RetryOverrides>,
}

#[derive(Debug, Default, Deserialize)]
struct RetryOverrides {
    base_delay_ms: Option<u64>,
    max_elapsed_secs: Option<u64>,
    search_attempts: Option<u32>,
    metadata_attempts: Option<u32>,
    page_attempts: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_budgets() {
        let config = ToolConfig::default();
        assert_eq!(config.search_retry.max_attempts, 5);
        assert_eq!(config.metadata_retry.max_attempts, 4);
        assert_eq!(config.page_retry.max_attempts, 4);
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_file_overrides_are_applied() {
        let overrides: FileConfig = toml::from_str(
            r#"
            api_base = "http://localhost:9000"
            search_limit = 3
            timeout_secs = 5

            [retry]
            base_delay_ms = 25
            search_attempts = 2
            "#,
        )
        .unwrap();

        let config = ToolConfig::default().apply(overrides);
        assert_eq!(config.api_base, "http://localhost:9000");
        assert_eq!(config.search_limit, 3);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.search_retry.base_delay, Duration::from_millis(25));
        assert_eq!(config.search_retry.max_attempts, 2);
        // Untouched budget keeps its default
        assert_eq!(config.metadata_retry.max_attempts, 4);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let overrides: FileConfig = toml::from_str("").unwrap();
        let config = ToolConfig::default().apply(overrides);
        assert_eq!(config.api_base, SEMANTIC_API_BASE);
        assert_eq!(config.site_base, SEMANTIC_SITE_BASE);
    }
}
