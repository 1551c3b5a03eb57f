//! Utility modules supporting the tool operations.
//!
//! - [`extract_pdf_link`]: pure HTML scan for the first `.pdf` anchor

mod html;

pub use html::extract_pdf_link;
