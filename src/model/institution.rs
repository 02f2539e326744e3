use crate::ConfigError;
use std::collections::BTreeMap;

/// Key of the catalog search URL prefix
pub const CATALOG_SEARCH_URL: &str = "catalog_search_url";

/// Key of the optional regular expression that catalog links must match
pub const VALID_CATALOG_LINKS_MATCH: &str = "valid_catalog_links_match";

/// Institution-wide settings keyed by normalized (lower_snake_case) name
///
/// Loaded once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstitutionConfig {
    values: BTreeMap<String, String>,
}

impl InstitutionConfig {
    /// Creates a config from already-normalized key/value pairs
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Returns the value for a normalized key, if present and non-blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Returns the catalog search URL prefix
    ///
    /// # Returns
    ///
    /// * `Ok(&str)` - The prefix the encoded search term is appended to
    /// * `Err(ConfigError::Missing)` - The setting is absent or blank
    pub fn catalog_search_url(&self) -> Result<&str, ConfigError> {
        self.get(CATALOG_SEARCH_URL)
            .ok_or_else(|| ConfigError::Missing(CATALOG_SEARCH_URL.to_string()))
    }

    /// Returns the optional catalog link pattern
    pub fn valid_catalog_links_match(&self) -> Option<&str> {
        self.get(VALID_CATALOG_LINKS_MATCH)
    }

    /// Iterates over all settings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for InstitutionConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
