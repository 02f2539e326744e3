//! Configuration module for Database360
//!
//! This module handles loading, parsing, and validating the TOML run settings, and
//! ingesting the institution and resources sheets they point at.
//!
//! # Example
//!
//! ```no_run
//! use database360::config::{load_settings, SheetLoader};
//! use std::path::Path;
//!
//! # async fn example() -> database360::Result<()> {
//! let settings = load_settings(Path::new("database360.toml"))?;
//! let loader = SheetLoader::new(&settings)?;
//! let institution = loader.load_institution_config().await?;
//! println!("Searching: {}", institution.catalog_search_url()?);
//! # Ok(())
//! # }
//! ```

mod normalize;
mod parser;
mod sheet;
mod types;
mod validation;

// Re-export types
pub use types::{ProbeSettings, Settings, SourcesConfig};

// Re-export parser and loader functions
pub use normalize::normalize_key;
pub use parser::{compute_settings_hash, load_settings, load_settings_with_hash};
pub use sheet::{parse_institution, parse_resources, SheetLoader, SheetSource};
pub use validation::validate_institution;

use crate::model::{InstitutionConfig, ResourceRecord};

/// Loads both sheets named by the settings
///
/// # Returns
///
/// * `Ok((InstitutionConfig, Vec<ResourceRecord>))` - Validated institution settings and resources in sheet order
/// * `Err(Db360Error)` - Either sheet could not be fetched or parsed, or a required setting is missing
pub async fn load_sources(
    settings: &Settings,
) -> crate::Result<(InstitutionConfig, Vec<ResourceRecord>)> {
    let loader = SheetLoader::new(settings)?;
    let institution = loader.load_institution_config().await?;
    validate_institution(&institution)?;
    let resources = loader.load_resources().await?;
    Ok((institution, resources))
}
