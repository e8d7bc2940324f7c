//! Link extraction for fetched HTML
//!
//! Followable links are `<a href>` anchors without a `download` attribute and
//! `<link rel="canonical">` elements. Each href is resolved against the page's
//! final URL and kept only if it lands on http(s). Links are returned in
//! document order; repeats are left for the visited set to absorb.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Schemes that never point at a crawlable page
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Parses HTML content and returns its followable links
///
/// # Example
///
/// ```
/// use ripple_crawl::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(parse_html(html, &base_url), vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href], link[rel='canonical'][href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| is_followable(element))
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

fn is_followable(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    !(value.name() == "a" && value.attr("download").is_some())
}

/// Resolves an href to an absolute http(s) URL with its fragment removed
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix)) {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if !matches!(absolute.scheme(), "http" | "https") {
        return None;
    }
    absolute.set_fragment(None);

    Some(absolute.into())
}
