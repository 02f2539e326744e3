use crate::probe::DEFAULT_USER_AGENT;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main settings structure for Database360
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sources: SourcesConfig,
    #[serde(default)]
    pub probe: ProbeSettings,

    /// Directory relative sheet paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Where the institution and resources sheets come from
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Institution settings sheet (local CSV path or URL)
    pub institution: String,

    /// Resources sheet (local CSV path or URL)
    pub resources: String,
}

/// Probe behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Pause after each resource's catalog probe (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Upper bound on each catalog request (seconds)
    #[serde(rename = "catalog-timeout-secs")]
    pub catalog_timeout_secs: u64,

    /// Upper bound on each PURL request (seconds)
    #[serde(rename = "purl-timeout-secs")]
    pub purl_timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl ProbeSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }

    pub fn purl_timeout(&self) -> Duration {
        Duration::from_secs(self.purl_timeout_secs)
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            catalog_timeout_secs: 30,
            purl_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
