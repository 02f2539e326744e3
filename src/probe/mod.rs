//! Probe module for catalog and PURL checks
//!
//! This module contains the core probing logic, including:
//! - HTTP fetching with a fixed browser User-Agent
//! - HTML anchor extraction and catalog link matching
//! - Catalog search and PURL link discovery
//! - PURL resolution and landing-page text verification
//! - Per-resource courtesy delay
//! - Overall run orchestration

mod catalog;
mod fetcher;
mod parser;
mod purl;
mod runner;
mod throttle;

pub use catalog::CatalogProber;
pub use fetcher::{FetchedPage, PageFetcher, DEFAULT_USER_AGENT};
pub use parser::{contains_ignore_case, extract_anchors, find_purl_link_text, Anchor, LinkMatcher};
pub use purl::PurlProber;
pub use runner::ProbeRunner;
pub use throttle::Throttle;

use crate::config::ProbeSettings;
use crate::model::{InstitutionConfig, ProbeResult, ResourceRecord};

/// Runs a complete probe over a resource collection
///
/// This is the main entry point for a run. It will:
/// 1. Validate the institution settings and compile the link pattern
/// 2. Build the HTTP clients
/// 3. Probe every resource against the catalog and its PURL, in order
///
/// # Returns
///
/// * `Ok(Vec<ProbeResult>)` - One result per resource, in input order
/// * `Err(Db360Error)` - The institution settings are unusable
pub async fn run_probes(
    institution: &InstitutionConfig,
    resources: &[ResourceRecord],
    settings: &ProbeSettings,
) -> crate::Result<Vec<ProbeResult>> {
    let runner = ProbeRunner::new(institution, settings)?;
    Ok(runner.run(resources).await)
}
