//! HTML anchor extraction and catalog link matching
//!
//! This module handles:
//! - Collecting the `<a>` elements of a page, in document order
//! - Selecting the catalog link for a database name (the Matcher)
//! - Finding the anchor that points at a resource's PURL

use crate::url::resolve_href;
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// An `<a>` element reduced to what the probes inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw `href` attribute, if any
    pub href: Option<String>,
    /// Visible text, entities decoded, untrimmed
    pub text: String,
}

/// Extracts every anchor from an HTML document, in document order
///
/// # Example
///
/// ```
/// use database360::probe::extract_anchors;
///
/// let anchors = extract_anchors(r#"<p><a href="/catalog/1">Art &amp; Design</a><a>no href</a></p>"#);
/// assert_eq!(anchors.len(), 2);
/// assert_eq!(anchors[0].href.as_deref(), Some("/catalog/1"));
/// assert_eq!(anchors[0].text, "Art & Design");
/// assert_eq!(anchors[1].href, None);
/// ```
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let mut anchors = Vec::new();

    if let Ok(selector) = Selector::parse("a") {
        for element in document.select(&selector) {
            anchors.push(Anchor {
                href: element.value().attr("href").map(str::to_string),
                text: element.text().collect(),
            });
        }
    }

    anchors
}

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Selects the catalog link for a database name from a search-results page
///
/// Holds the institution's optional href pattern, compiled once per run.
#[derive(Debug, Clone, Default)]
pub struct LinkMatcher {
    pattern: Option<Regex>,
}

impl LinkMatcher {
    /// Creates a matcher
    ///
    /// # Arguments
    ///
    /// * `pattern` - Regular expression a candidate href must match (searched, case-sensitive)
    ///
    /// # Returns
    ///
    /// * `Ok(LinkMatcher)` - Compiled matcher
    /// * `Err(ConfigError::InvalidPattern)` - The pattern is not a valid regular expression
    pub fn new(pattern: Option<&str>) -> Result<Self, ConfigError> {
        let pattern = pattern.map(Regex::new).transpose()?;
        Ok(Self { pattern })
    }

    /// The pattern source, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Returns true if the anchor's text contains the name and its href passes the pattern
    pub fn is_candidate(&self, anchor: &Anchor, database_name: &str) -> bool {
        let Some(href) = anchor.href.as_deref() else {
            return false;
        };

        if !contains_ignore_case(&anchor.text, database_name) {
            return false;
        }

        match &self.pattern {
            Some(pattern) => pattern.is_match(href),
            None => true,
        }
    }

    /// Selects the first qualifying anchor and resolves it against the page URL
    ///
    /// First match in document order wins, preserving the catalog's own
    /// relevance ranking. Anchors whose href cannot be resolved are passed over.
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - Absolute URL of the selected catalog link
    /// * `None` - No anchor qualifies, or the name is blank
    pub fn select(&self, anchors: &[Anchor], database_name: &str, page_url: &Url) -> Option<Url> {
        if database_name.trim().is_empty() {
            return None;
        }

        anchors
            .iter()
            .filter(|anchor| self.is_candidate(anchor, database_name))
            .find_map(|anchor| resolve_href(anchor.href.as_deref()?, page_url))
    }
}

/// Finds the trimmed text of the first anchor whose href is exactly the PURL
///
/// The comparison is byte-for-byte: a trailing slash or a different scheme is
/// a different link. An anchor with blank text counts as not found.
pub fn find_purl_link_text(anchors: &[Anchor], purl: &str) -> Option<String> {
    anchors
        .iter()
        .find(|anchor| anchor.href.as_deref() == Some(purl))
        .map(|anchor| anchor.text.trim().to_string())
        .filter(|text| !text.is_empty())
}
