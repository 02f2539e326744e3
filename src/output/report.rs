//! JSON run report

use crate::model::ProbeResult;
use crate::output::stats::RunStatistics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Everything a run produced, ready to serialize
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,

    /// SHA-256 of the settings file that drove the run
    pub settings_hash: String,

    pub statistics: RunStatistics,

    /// One entry per resource, in sheet order
    pub results: Vec<ProbeResult>,
}

impl Report {
    pub fn new(settings_hash: impl Into<String>, results: Vec<ProbeResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            settings_hash: settings_hash.into(),
            statistics: RunStatistics::from_results(&results),
            results,
        }
    }
}

/// Writes the report as pretty-printed JSON followed by a newline
pub fn write_report<W: Write>(report: &Report, mut out: W) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}
