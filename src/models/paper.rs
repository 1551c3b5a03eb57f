//! Paper models mirroring the Semantic Scholar Graph API field projections.
//!
//! Upstream bodies are deserialized defensively: every field the API may
//! omit or null out maps to an `Option` or a default, so a sparse record
//! never fails the whole response.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// A single author entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
}

/// One search hit. Produced only by the search operation; ordering follows
/// upstream relevance ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

impl PaperRecord {
    /// Author names in upstream order, skipping entries without a name.
    pub fn author_names(&self) -> Vec<&str> {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect()
    }
}

/// Full metadata for one paper, keyed by an opaque identifier (Semantic
/// Scholar ID, DOI, or arXiv ID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperMetadata {
    #[serde(default)]
    pub paper_id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reference_count: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub citation_count: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fields_of_study: BTreeSet<String>,
}

impl PaperMetadata {
    /// Author names in upstream order, skipping entries without a name.
    pub fn author_names(&self) -> Vec<&str> {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect()
    }
}

/// The API sends explicit `null` for absent counts and lists; treat that the
/// same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_sparse_fields() {
        let json = r#"{"title": "Attention Is All You Need"}"#;
        let record: PaperRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title, "Attention Is All You Need");
        assert!(record.authors.is_empty());
        assert_eq!(record.year, None);
        assert_eq!(record.r#abstract, None);
        assert_eq!(record.url, None);
    }

    #[test]
    fn test_record_preserves_author_order() {
        let json = r#"{
            "title": "T",
            "authors": [{"name": "Ada"}, {"name": null}, {"name": "Grace"}]
        }"#;
        let record: PaperRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.author_names(), vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_metadata_parses_full_body() {
        let json = r#"{
            "paperId": "649def34f8be52c8b66281af98ae884c09aef38b",
            "title": "Construction of the Literature Graph",
            "abstract": "We describe a deployed system.",
            "year": 2018,
            "venue": "NAACL",
            "url": "https://www.semanticscholar.org/paper/649def",
            "referenceCount": 27,
            "citationCount": 299,
            "fieldsOfStudy": ["Computer Science"],
            "authors": [{"name": "Waleed Ammar"}]
        }"#;
        let meta: PaperMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.year, Some(2018));
        assert_eq!(meta.venue.as_deref(), Some("NAACL"));
        assert_eq!(meta.reference_count, 27);
        assert_eq!(meta.citation_count, 299);
        assert!(meta.fields_of_study.contains("Computer Science"));
        assert_eq!(meta.author_names(), vec!["Waleed Ammar"]);
    }

    #[test]
    fn test_metadata_tolerates_nulls() {
        let json = r#"{
            "paperId": "abc",
            "title": "T",
            "referenceCount": null,
            "citationCount": null,
            "fieldsOfStudy": null,
            "authors": null
        }"#;
        let meta: PaperMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.reference_count, 0);
        assert_eq!(meta.citation_count, 0);
        assert!(meta.fields_of_study.is_empty());
        assert!(meta.authors.is_empty());
    }
}
