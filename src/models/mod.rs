//! Core data structures for paper search and metadata lookup.

mod paper;

pub use paper::{Author, PaperMetadata, PaperRecord};
