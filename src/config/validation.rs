use crate::config::types::{ProbeSettings, Settings, SourcesConfig};
use crate::model::InstitutionConfig;
use crate::ConfigError;
use url::Url;

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_DELAY_MS: u64 = 60_000;

/// Validates the entire settings file
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_sources(&settings.sources)?;
    validate_probe_settings(&settings.probe)?;
    Ok(())
}

/// Validates sheet sources
fn validate_sources(sources: &SourcesConfig) -> Result<(), ConfigError> {
    if sources.institution.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sources.institution cannot be empty".to_string(),
        ));
    }

    if sources.resources.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sources.resources cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates probe configuration
fn validate_probe_settings(probe: &ProbeSettings) -> Result<(), ConfigError> {
    for (name, value) in [
        ("catalog-timeout-secs", probe.catalog_timeout_secs),
        ("purl-timeout-secs", probe.purl_timeout_secs),
    ] {
        if value < 1 || value > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_TIMEOUT_SECS, value
            )));
        }
    }

    if probe.delay_ms > MAX_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "delay-ms must be <= {}ms, got {}ms",
            MAX_DELAY_MS, probe.delay_ms
        )));
    }

    if probe.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the institution settings loaded from the institution sheet
///
/// `catalog_search_url` must be present and must be an HTTP(S) URL.
pub fn validate_institution(config: &InstitutionConfig) -> Result<(), ConfigError> {
    let search_url = config.catalog_search_url()?;

    let url = Url::parse(search_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid catalog_search_url '{}': {}", search_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "catalog_search_url must use HTTP or HTTPS, got '{}'",
            search_url
        )));
    }

    Ok(())
}
