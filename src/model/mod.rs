//! Data model for institution settings, resource rows and probe results
//!
//! # Components
//!
//! - `InstitutionConfig`: Normalized institution settings (catalog search URL, link pattern)
//! - `ResourceRecord`: One row of the resources sheet with the fields the probes inspect
//! - `ProbeResult`: The merged catalog and PURL outcome for one resource

mod institution;
mod resource;
mod result;

// Re-export main types
pub use institution::{InstitutionConfig, CATALOG_SEARCH_URL, VALID_CATALOG_LINKS_MATCH};
pub use resource::ResourceRecord;
pub use result::{CatalogProbe, ProbeResult, PurlProbe};
