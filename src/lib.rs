//! Database360: catalog and PURL discoverability checks
//!
//! This crate probes a library's online catalog for each electronic resource listed
//! in the holdings spreadsheet, verifies that the catalog record links to the
//! resource's PURL, and checks that the PURL resolves to the expected landing page.

pub mod config;
pub mod model;
pub mod output;
pub mod probe;
pub mod url;

use thiserror::Error;

/// Main error type for Database360 operations
#[derive(Debug, Error)]
pub enum Db360Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
///
/// Every variant is fatal to a run: no probing can happen without a usable
/// institution configuration and resource list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required institution setting: {0}")]
    Missing(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid link pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to fetch sheet from {url}: {source}")]
    Remote { url: String, source: reqwest::Error },
}

/// HTTP-level or network-level failure of a single GET
///
/// Recovered inside the probers; never escapes a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },
}

/// Failure while probing one resource that is not a fetch failure
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },
}

/// Result type alias for Database360 operations
pub type Result<T> = std::result::Result<T, Db360Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::{load_settings, load_sources, Settings};
pub use model::{CatalogProbe, InstitutionConfig, ProbeResult, PurlProbe, ResourceRecord};
pub use probe::ProbeRunner;
