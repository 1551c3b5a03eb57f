//! PDF link extraction from paper pages.

use scraper::{Html, Selector};

/// Scan anchors in document order and return the first `href` that ends in
/// `.pdf` (case-insensitive), resolved against `site_origin` when the link
/// is site-relative.
///
/// Pure function: no network access, deterministic for identical input.
pub fn extract_pdf_link(html: &str, site_origin: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").ok()?;

    for anchor in document.select(&anchors) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        if href.to_ascii_lowercase().ends_with(".pdf") {
            if href.starts_with('/') {
                return Some(format!("{}{}", site_origin, href));
            }
            return Some(href.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SEMANTIC_SITE_BASE;

    #[test]
    fn test_relative_link_is_resolved_against_origin() {
        let html = r#"<html><body><a href="/abc.pdf">PDF</a></body></html>"#;
        assert_eq!(
            extract_pdf_link(html, SEMANTIC_SITE_BASE),
            Some("https://www.semanticscholar.org/abc.pdf".to_string())
        );
    }

    #[test]
    fn test_absolute_link_and_case_are_preserved() {
        let html = r#"<a href="https://x.org/y.PDF">download</a>"#;
        assert_eq!(
            extract_pdf_link(html, SEMANTIC_SITE_BASE),
            Some("https://x.org/y.PDF".to_string())
        );
    }

    #[test]
    fn test_no_matching_anchor() {
        let html = r#"<a href="/paper/123">paper</a><a href="/logo.png">logo</a>"#;
        assert_eq!(extract_pdf_link(html, SEMANTIC_SITE_BASE), None);
    }

    #[test]
    fn test_first_match_in_document_order_wins() {
        let html = r#"
            <a href="/first.pdf">one</a>
            <a href="/second.pdf">two</a>
        "#;
        assert_eq!(
            extract_pdf_link(html, SEMANTIC_SITE_BASE),
            Some("https://www.semanticscholar.org/first.pdf".to_string())
        );
    }

    #[test]
    fn test_pdf_in_path_but_not_suffix_is_skipped() {
        let html = r#"<a href="/pdfs/index.html">listing</a>"#;
        assert_eq!(extract_pdf_link(html, SEMANTIC_SITE_BASE), None);
    }
}
