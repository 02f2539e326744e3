//! PURL prober
//!
//! Resolves a resource's PURL and checks the landing page for the expected text.

use crate::model::{PurlProbe, ResourceRecord};
use crate::probe::fetcher::PageFetcher;
use crate::probe::parser::contains_ignore_case;

/// Checks that PURLs lead to the expected database home page
pub struct PurlProber {
    fetcher: PageFetcher,
}

impl PurlProber {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Probes one resource's PURL
    ///
    /// Returns an empty result, meaning no determination, when the PURL or the
    /// expected text is missing or blank, or when the fetch fails for any reason.
    /// Only a successful fetch records `purl_led_to_database`, as true or false.
    pub async fn probe(&self, resource: &ResourceRecord) -> PurlProbe {
        let (Some(purl), Some(expected_text)) = (resource.purl(), resource.expected_text()) else {
            return PurlProbe::default();
        };

        match self.fetcher.fetch(purl).await {
            Ok(page) => {
                let led_to_database = contains_ignore_case(&page.body, expected_text);
                tracing::debug!(
                    "PURL {} resolved to {} (expected text found: {})",
                    purl,
                    page.url,
                    led_to_database
                );
                PurlProbe::checked(led_to_database)
            }
            Err(e) => {
                tracing::warn!("Error checking PURL {}: {}", purl, e);
                PurlProbe::default()
            }
        }
    }
}
