//! Per-resource probe results
//!
//! An absent field means "not determined". It serializes as a missing key, so an
//! empty sub-result is `{}`, which stays distinct from an explicit `false`.

use serde::Serialize;

/// Outcome of the catalog search for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogProbe {
    /// Absolute URL of the catalog record that matched the database name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_url_link: Option<String>,

    /// Trimmed text of the catalog record's anchor pointing at the PURL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl_link_text: Option<String>,

    /// Message of an unexpected failure while probing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CatalogProbe {
    /// Creates a result recording an unexpected probe failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns true if nothing was determined
    pub fn is_empty(&self) -> bool {
        self.catalog_url_link.is_none() && self.purl_link_text.is_none() && self.error.is_none()
    }
}

/// Outcome of resolving one resource's PURL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurlProbe {
    /// Whether the PURL's target page contained the expected text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl_led_to_database: Option<bool>,
}

impl PurlProbe {
    /// Creates a result with a definitive determination
    pub fn checked(led_to_database: bool) -> Self {
        Self {
            purl_led_to_database: Some(led_to_database),
        }
    }

    /// Returns true if no determination was made
    pub fn is_empty(&self) -> bool {
        self.purl_led_to_database.is_none()
    }
}

/// Merged result for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub database_name: Option<String>,
    pub catalog_probe: CatalogProbe,
    pub purl_probe: PurlProbe,
}
