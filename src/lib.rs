//! # paperscout
//!
//! Resilient tool operations over the Semantic Scholar API: paper search,
//! metadata lookup, and PDF-link discovery, with bounded retry and
//! exponential backoff against a rate-limited upstream.
//!
//! ## Architecture
//!
//! - [`fetch`]: resilient HTTP fetcher in async and blocking execution modes,
//!   both driven by one shared [`fetch::RetryPolicy`]
//! - [`tools`]: the three operations and their error boundary
//! - [`models`]: typed paper records and metadata
//! - [`utils`]: pure PDF-link extraction from HTML
//! - [`config`]: explicit configuration passed into constructors
//!
//! ## Example
//!
//! ```rust,no_run
//! use paperscout::{config::ToolConfig, PaperTools};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tools = PaperTools::new(ToolConfig::default())?;
//! let papers = tools.search_papers("graph neural networks").await?;
//! for paper in &papers {
//!     println!("{} ({:?})", paper.title, paper.year);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetch;
pub mod models;
pub mod tools;
pub mod utils;

// Re-export commonly used types
pub use models::{Author, PaperMetadata, PaperRecord};
pub use tools::{BlockingPaperTools, PaperTools, ToolError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
