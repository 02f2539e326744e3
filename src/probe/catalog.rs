//! Catalog prober
//!
//! Searches the institution's catalog for a resource by name, picks the catalog
//! record link, and reads the text of the record's link to the resource's PURL.

use crate::model::{CatalogProbe, ResourceRecord};
use crate::probe::fetcher::PageFetcher;
use crate::probe::parser::{extract_anchors, find_purl_link_text, LinkMatcher};
use crate::probe::throttle::Throttle;
use crate::url::build_search_url;
use crate::ProbeError;
use url::Url;

/// Probes the catalog for one resource at a time
pub struct CatalogProber {
    search_base_url: String,
    matcher: LinkMatcher,
    fetcher: PageFetcher,
    throttle: Throttle,
}

impl CatalogProber {
    /// Creates a catalog prober
    ///
    /// # Arguments
    ///
    /// * `search_base_url` - Prefix the percent-encoded name is appended to
    /// * `matcher` - Link matcher holding the institution's href pattern
    /// * `fetcher` - Fetcher used for the search and record pages
    /// * `throttle` - Pause applied after each resource
    pub fn new(
        search_base_url: impl Into<String>,
        matcher: LinkMatcher,
        fetcher: PageFetcher,
        throttle: Throttle,
    ) -> Self {
        Self {
            search_base_url: search_base_url.into(),
            matcher,
            fetcher,
            throttle,
        }
    }

    /// Probes the catalog for a resource
    ///
    /// # Probe Flow
    ///
    /// 1. No database name → empty result, no request, no pause
    /// 2. Fetch `search_base_url + encode(name)`; fetch failure → empty result
    /// 3. First anchor whose text contains the name and whose href passes the pattern
    ///    → `catalog_url_link`; none → empty result
    /// 4. With a PURL, fetch the record page and take the trimmed text of the anchor
    ///    whose href is exactly the PURL → `purl_link_text`
    /// 5. Pause for the throttle delay, whatever the outcome
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogProbe)` - Whatever could be determined; fetch failures leave fields unset
    /// * `Err(ProbeError)` - The search URL could not be built
    pub async fn probe(&self, resource: &ResourceRecord) -> Result<CatalogProbe, ProbeError> {
        let Some(database_name) = resource.name() else {
            return Ok(CatalogProbe::default());
        };

        let outcome = self.search(database_name, resource.purl()).await;
        self.throttle.pause().await;
        outcome
    }

    async fn search(
        &self,
        database_name: &str,
        purl: Option<&str>,
    ) -> Result<CatalogProbe, ProbeError> {
        // Search the catalog
        let search_url = build_search_url(&self.search_base_url, database_name)?;
        tracing::debug!("Searching: {}", search_url);

        let page = match self.fetcher.fetch(search_url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error searching for {}: {}", database_name, e);
                return Ok(CatalogProbe::default());
            }
        };

        // Pick the catalog record, resolved against the final URL
        let anchors = extract_anchors(&page.body);
        let Some(catalog_link) = self.matcher.select(&anchors, database_name, &page.url) else {
            tracing::debug!(
                "No catalog link for {} among {} anchors",
                database_name,
                anchors.len()
            );
            return Ok(CatalogProbe::default());
        };
        tracing::info!("Found catalog link for {}: {}", database_name, catalog_link);

        // Follow the record and look for the PURL
        let purl_link_text = match purl {
            Some(purl) => self.purl_link_text(&catalog_link, purl).await,
            None => None,
        };

        Ok(CatalogProbe {
            catalog_url_link: Some(catalog_link.to_string()),
            purl_link_text,
            error: None,
        })
    }

    async fn purl_link_text(&self, catalog_link: &Url, purl: &str) -> Option<String> {
        match self.fetcher.fetch(catalog_link.as_str()).await {
            Ok(page) => {
                let text = find_purl_link_text(&extract_anchors(&page.body), purl);
                if text.is_none() {
                    tracing::debug!("No link to {} on {}", purl, catalog_link);
                }
                text
            }
            Err(e) => {
                tracing::warn!("Error following catalog link {}: {}", catalog_link, e);
                None
            }
        }
    }
}
