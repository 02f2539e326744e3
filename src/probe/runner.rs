//! Probe runner - per-resource orchestration
//!
//! Iterates the resources in input order, runs the catalog and PURL probes for
//! each, and merges them into one result per resource. A failure while probing
//! one resource never affects another.

use crate::config::ProbeSettings;
use crate::model::{CatalogProbe, InstitutionConfig, ProbeResult, ResourceRecord};
use crate::probe::catalog::CatalogProber;
use crate::probe::fetcher::PageFetcher;
use crate::probe::parser::LinkMatcher;
use crate::probe::purl::PurlProber;
use crate::probe::throttle::Throttle;
use std::time::Instant;

/// Runs every probe over a resource collection
pub struct ProbeRunner {
    catalog: CatalogProber,
    purl: PurlProber,
}

impl ProbeRunner {
    /// Creates a runner for one institution
    ///
    /// The link pattern is compiled here, once per run.
    ///
    /// # Returns
    ///
    /// * `Ok(ProbeRunner)` - Ready to run
    /// * `Err(Db360Error::Config)` - `catalog_search_url` is missing or the link pattern is invalid
    /// * `Err(Db360Error::Reqwest)` - The HTTP clients could not be built
    pub fn new(institution: &InstitutionConfig, settings: &ProbeSettings) -> crate::Result<Self> {
        // Institution settings are checked once, before any request
        let search_base_url = institution.catalog_search_url()?;
        let matcher = LinkMatcher::new(institution.valid_catalog_links_match())?;

        let catalog_fetcher = PageFetcher::new(&settings.user_agent, settings.catalog_timeout())?;
        let purl_fetcher = PageFetcher::new(&settings.user_agent, settings.purl_timeout())?;

        tracing::debug!(
            "Catalog search URL: {}, link pattern: {:?}",
            search_base_url,
            matcher.pattern()
        );

        Ok(Self {
            catalog: CatalogProber::new(
                search_base_url,
                matcher,
                catalog_fetcher,
                Throttle::new(settings.delay()),
            ),
            purl: PurlProber::new(purl_fetcher),
        })
    }

    /// Probes every resource, sequentially and in order
    ///
    /// The output has exactly one result per input resource, at the same index.
    pub async fn run(&self, resources: &[ResourceRecord]) -> Vec<ProbeResult> {
        let total = resources.len();
        let start_time = Instant::now();
        tracing::info!("Probing {} resources", total);

        let mut results = Vec::with_capacity(total);
        for (i, resource) in resources.iter().enumerate() {
            tracing::info!(
                "Processing {}/{}: {}",
                i + 1,
                total,
                resource.name().unwrap_or("Unknown")
            );
            results.push(self.probe_resource(resource).await);
        }

        tracing::info!(
            "Probed {} resources in {:?}",
            results.len(),
            start_time.elapsed()
        );

        results
    }

    /// Runs both probes for one resource and merges their results
    pub async fn probe_resource(&self, resource: &ResourceRecord) -> ProbeResult {
        let catalog_probe = match self.catalog.probe(resource).await {
            Ok(probe) => probe,
            Err(e) => {
                tracing::warn!(
                    "Error in catalog probe for {}: {}",
                    resource.name().unwrap_or("Unknown"),
                    e
                );
                CatalogProbe::failed(e.to_string())
            }
        };

        // Runs regardless of the catalog outcome
        let purl_probe = self.purl.probe(resource).await;

        ProbeResult {
            database_name: resource.database_name.clone(),
            catalog_probe,
            purl_probe,
        }
    }
}
