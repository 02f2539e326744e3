/// Normalizes a sheet header or setting name into a lower_snake_case key
///
/// Runs of characters that are not alphanumeric collapse into a single `_`, and
/// leading/trailing separators are dropped, so "Catalog Search URL",
/// " catalog-search url " and "catalog_search_url" all become
/// `catalog_search_url`.
///
/// # Examples
///
/// ```
/// use database360::config::normalize_key;
///
/// assert_eq!(normalize_key("Database Home Page Should Contain Text"),
///            "database_home_page_should_contain_text");
/// assert_eq!(normalize_key("PURL"), "purl");
/// ```
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    key
}
