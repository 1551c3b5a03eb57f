//! Blocking tool surface.
//!
//! Same operations and outcomes as [`crate::tools::PaperTools`], for callers
//! without an async runtime or running on a dedicated worker thread.

use crate::config::ToolConfig;
use crate::fetch::BlockingFetcher;
use crate::models::{PaperMetadata, PaperRecord};
use crate::tools::{
    into_body, parse_search_body, resolve_paper_page, validate_non_empty, ToolError,
    METADATA_FIELDS, SEARCH_FIELDS,
};
use crate::utils::extract_pdf_link;

/// Blocking tool operations over the Semantic Scholar API.
#[derive(Debug)]
pub struct BlockingPaperTools {
    fetcher: BlockingFetcher,
    config: ToolConfig,
}

impl BlockingPaperTools {
    /// Build the tool surface from an explicit configuration.
    pub fn new(config: ToolConfig) -> Result<Self, ToolError> {
        let fetcher = BlockingFetcher::new(config.timeout, config.api_key.clone())
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        Ok(Self { fetcher, config })
    }

    /// Search for papers matching a free-text query.
    pub fn search_papers(&self, query: &str) -> Result<Vec<PaperRecord>, ToolError> {
        validate_non_empty(query, "query")?;

        let url = format!("{}/paper/search", self.config.api_base);
        let params = [
            ("query", query.to_string()),
            ("limit", self.config.search_limit.to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
        ];

        let outcome = self.fetcher.get(&url, &params, &self.config.search_retry);
        parse_search_body(&into_body(outcome)?)
    }

    /// Fetch metadata for one paper by Semantic Scholar ID, DOI, or arXiv ID.
    pub fn get_paper_metadata(&self, paper_id: &str) -> Result<PaperMetadata, ToolError> {
        validate_non_empty(paper_id, "paper id")?;

        let url = format!(
            "{}/paper/{}",
            self.config.api_base,
            urlencoding::encode(paper_id)
        );
        let params = [("fields", METADATA_FIELDS.to_string())];

        let outcome = self.fetcher.get(&url, &params, &self.config.metadata_retry);
        let body = into_body(outcome)?;
        serde_json::from_str(&body).map_err(|e| ToolError::Parse(e.to_string()))
    }

    /// Scrape the paper page for a direct PDF link. `Ok(None)` means the
    /// page was fetched but carries no `.pdf` anchor.
    pub fn find_pdf_link(&self, paper_id_or_url: &str) -> Result<Option<String>, ToolError> {
        validate_non_empty(paper_id_or_url, "paper id or url")?;

        let url = resolve_paper_page(paper_id_or_url, &self.config.site_base);
        let outcome = self.fetcher.get(&url, &[], &self.config.page_retry);
        let body = into_body(outcome)?;
        Ok(extract_pdf_link(&body, &self.config.site_base))
    }
}
