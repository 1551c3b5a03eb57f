//! The three tool operations exposed to callers, in two calling conventions.
//!
//! - [`PaperTools`]: async methods for use inside a tokio runtime
//! - [`BlockingPaperTools`]: synchronous methods for worker threads
//!
//! Both surfaces expose the same operations with equivalent outcomes:
//!
//! - `search_papers(query)` — ordered search hits
//! - `get_paper_metadata(paper_id)` — typed metadata for one paper
//! - `find_pdf_link(paper_id_or_url)` — first `.pdf` anchor on the paper page
//!
//! Every upstream failure is converted to a [`ToolError`] at this boundary;
//! nothing below it leaks to callers.

mod blocking;
mod nonblocking;

pub use blocking::BlockingPaperTools;
pub use nonblocking::PaperTools;

use serde::Deserialize;
use url::Url;

use crate::fetch::FetchOutcome;
use crate::models::PaperRecord;

/// Fixed field projection for the search operation.
pub(crate) const SEARCH_FIELDS: &str = "title,authors,year,abstract,url";

/// Fixed field projection for the metadata operation.
pub(crate) const METADATA_FIELDS: &str =
    "title,authors,abstract,year,venue,url,referenceCount,citationCount,fieldsOfStudy";

/// Errors surfaced by the tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Upstream kept answering 429 until the retry budget ran out
    #[error("rate limited by Semantic Scholar API (429); try again later or configure an API key")]
    RateLimited,

    /// Non-retryable status, or a retryable 5xx that outlived the budget
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, DNS, timeout, or malformed-response failure
    #[error("request failed: {0}")]
    Transport(String),

    /// Upstream body did not match the expected shape
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Caller-side validation failure
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ToolError {
    /// Whether this error specifically signals upstream rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ToolError::RateLimited)
    }

    /// Structured error mapping for callers that consume JSON shapes.
    pub fn to_error_value(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Reduce a terminal fetch outcome to its body or the matching error.
pub(crate) fn into_body(outcome: FetchOutcome) -> Result<String, ToolError> {
    match outcome {
        FetchOutcome::Success { body, .. } => Ok(body),
        FetchOutcome::RateLimited => Err(ToolError::RateLimited),
        FetchOutcome::HttpError { status, body } => Err(ToolError::Http { status, body }),
        FetchOutcome::TransportError(message) => Err(ToolError::Transport(message)),
    }
}

/// Search response envelope; an absent `data` key means zero hits.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody {
    #[serde(default)]
    pub data: Vec<PaperRecord>,
}

pub(crate) fn parse_search_body(body: &str) -> Result<Vec<PaperRecord>, ToolError> {
    let parsed: SearchBody =
        serde_json::from_str(body).map_err(|e| ToolError::Parse(e.to_string()))?;
    Ok(parsed.data)
}

/// Accept a paper page URL as-is; synthesize the canonical page URL for a
/// bare identifier (S2 ID, DOI, or arXiv ID).
pub(crate) fn resolve_paper_page(paper_id_or_url: &str, site_base: &str) -> String {
    let is_http_url = Url::parse(paper_id_or_url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);

    if is_http_url {
        paper_id_or_url.to_string()
    } else {
        format!("{}/paper/{}", site_base, urlencoding::encode(paper_id_or_url))
    }
}

pub(crate) fn validate_non_empty(value: &str, what: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        Err(ToolError::InvalidRequest(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}
