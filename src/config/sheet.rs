//! Sheet ingestion
//!
//! The institution and resources sheets are CSV, either on disk or behind a URL.
//! Google Sheets share links are rewritten to their CSV export before fetching.

use crate::config::normalize::normalize_key;
use crate::config::types::Settings;
use crate::model::{InstitutionConfig, ResourceRecord};
use crate::url::sheet_export_url;
use crate::ConfigError;
use csv::{ReaderBuilder, StringRecord, Trim};
use reqwest::Client;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Location of one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    /// CSV file on disk
    Local(PathBuf),
    /// CSV served over HTTP(S)
    Remote(Url),
}

impl SheetSource {
    /// Interprets a configured source string
    ///
    /// `http://` and `https://` values are remote; anything else is a path,
    /// resolved against `base_dir` when relative.
    pub fn parse(raw: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw)
                .map_err(|e| ConfigError::InvalidUrl(format!("Invalid sheet URL '{}': {}", raw, e)))?;
            // Google Sheets share links become CSV export links
            return Ok(Self::Remote(sheet_export_url(&url).unwrap_or(url)));
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            Ok(Self::Local(path.to_path_buf()))
        } else {
            Ok(Self::Local(base_dir.join(path)))
        }
    }
}

/// Reads the institution and resources sheets for a run
pub struct SheetLoader {
    institution: SheetSource,
    resources: SheetSource,
    client: Client,
}

impl SheetLoader {
    /// Creates a loader for the sheets named in the settings
    ///
    /// Remote sheets are fetched with the same User-Agent and timeout as catalog
    /// requests.
    pub fn new(settings: &Settings) -> crate::Result<Self> {
        let institution = SheetSource::parse(&settings.sources.institution, &settings.base_dir)?;
        let resources = SheetSource::parse(&settings.sources.resources, &settings.base_dir)?;
        let client = Client::builder()
            .user_agent(settings.probe.user_agent.as_str())
            .timeout(settings.probe.catalog_timeout())
            .build()?;

        Ok(Self {
            institution,
            resources,
            client,
        })
    }

    /// Loads the institution settings sheet
    pub async fn load_institution_config(&self) -> Result<InstitutionConfig, ConfigError> {
        let text = self.read(&self.institution).await?;
        let config = parse_institution(&text)?;
        tracing::info!("Loaded {} institution settings", config.len());
        Ok(config)
    }

    /// Loads the resources sheet, in sheet order
    pub async fn load_resources(&self) -> Result<Vec<ResourceRecord>, ConfigError> {
        let text = self.read(&self.resources).await?;
        let resources = parse_resources(&text)?;
        tracing::info!("Loaded {} resources", resources.len());
        Ok(resources)
    }

    async fn read(&self, source: &SheetSource) -> Result<String, ConfigError> {
        match source {
            SheetSource::Local(path) => {
                tracing::debug!("Reading sheet from {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
            SheetSource::Remote(url) => {
                tracing::debug!("Fetching sheet from {}", url);
                let remote = |source| ConfigError::Remote {
                    url: url.to_string(),
                    source,
                };
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(remote)?;
                response.text().await.map_err(remote)
            }
        }
    }
}

/// Parses the institution sheet
///
/// The first row is a header and is skipped. Each following row is a
/// setting name and its value; names are normalized, rows without a name
/// are ignored, and a repeated name keeps its last value.
pub fn parse_institution(text: &str) -> Result<InstitutionConfig, ConfigError> {
    let mut reader = csv_reader(text);
    let mut values = BTreeMap::new();

    for record in reader.records() {
        let record = record?;
        // Column 0 is the setting name, column 1 its value
        let key = normalize_key(record.get(0).unwrap_or(""));
        if key.is_empty() {
            continue;
        }
        let value = record.get(1).unwrap_or("").to_string();
        values.insert(key, value);
    }

    Ok(InstitutionConfig::new(values))
}

/// Parses the resources sheet
///
/// Headers are normalized into keys. Rows whose cells are all blank are
/// dropped; every other row yields one record.
pub fn parse_resources(text: &str) -> Result<Vec<ResourceRecord>, ConfigError> {
    let mut reader = csv_reader(text);
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_key).collect();

    let mut resources = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let mut resource = ResourceRecord::default();
        for (key, value) in headers.iter().zip(record.iter()) {
            if !key.is_empty() {
                resource.set(key, value);
            }
        }
        resources.push(resource);
    }

    Ok(resources)
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}
