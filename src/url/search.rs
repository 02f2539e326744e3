use crate::ProbeError;
use url::Url;

/// Builds the catalog search URL for a database name
///
/// The search base is expected to already end in a query-string assignment
/// (e.g. `...&q=`), so the percent-encoded name is appended by plain string
/// concatenation rather than path joining. Every byte other than ASCII
/// alphanumerics, `-_.~` and `/` is encoded.
///
/// # Arguments
///
/// * `search_base_url` - The institution's catalog search URL prefix
/// * `database_name` - The name to search for
///
/// # Returns
///
/// * `Ok(Url)` - The parsed search URL
/// * `Err(ProbeError::InvalidUrl)` - The concatenation is not a valid URL
///
/// # Examples
///
/// ```
/// use database360::url::build_search_url;
///
/// let url = build_search_url(
///     "https://catalog.example.edu/catalog?search_field=title&q=",
///     "Art & Architecture Source",
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://catalog.example.edu/catalog?search_field=title&q=Art%20%26%20Architecture%20Source"
/// );
/// ```
pub fn build_search_url(search_base_url: &str, database_name: &str) -> Result<Url, ProbeError> {
    // `/` is a safe character and stays literal
    let encoded = urlencoding::encode(database_name).replace("%2F", "/");
    let raw = format!("{}{}", search_base_url, encoded);
    Url::parse(&raw).map_err(|source| ProbeError::InvalidUrl { url: raw, source })
}
