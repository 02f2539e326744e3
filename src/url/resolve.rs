use url::Url;

/// Resolves an anchor href against the URL of the page it appeared on
///
/// Returns None when the href is blank or cannot be joined onto the base.
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok()
}
