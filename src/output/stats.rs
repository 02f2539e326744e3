//! Statistics over a run's probe results

use crate::model::ProbeResult;
use serde::Serialize;
use std::io::{self, Write};

/// Counts of probe outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Number of resources probed
    pub total_resources: u64,

    /// Resources without a database name
    pub skipped: u64,

    /// Resources whose catalog search produced a record link
    pub found_in_catalog: u64,

    /// Resources whose catalog record links to their PURL
    pub purl_linked_from_catalog: u64,

    /// Resources whose PURL was fetched and checked
    pub purl_checked: u64,

    /// Resources whose PURL led to a page with the expected text
    pub purl_led_to_database: u64,

    /// Resources whose catalog probe failed unexpectedly
    pub errors: u64,
}

impl RunStatistics {
    /// Tallies a run's results
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut stats = Self::default();

        for result in results {
            stats.total_resources += 1;

            let has_name = result
                .database_name
                .as_deref()
                .is_some_and(|name| !name.trim().is_empty());
            if !has_name {
                stats.skipped += 1;
            }

            let catalog = &result.catalog_probe;
            if catalog.catalog_url_link.is_some() {
                stats.found_in_catalog += 1;
            }
            if catalog.purl_link_text.is_some() {
                stats.purl_linked_from_catalog += 1;
            }
            if catalog.error.is_some() {
                stats.errors += 1;
            }

            if let Some(led_to_database) = result.purl_probe.purl_led_to_database {
                stats.purl_checked += 1;
                if led_to_database {
                    stats.purl_led_to_database += 1;
                }
            }
        }

        stats
    }
}

/// Writes statistics in a formatted manner
pub fn write_statistics<W: Write>(stats: &RunStatistics, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Probe Statistics ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Resources probed: {}", stats.total_resources)?;
    writeln!(out, "  Skipped (no database name): {}", stats.skipped)?;
    writeln!(out, "  Unexpected errors: {}", stats.errors)?;
    writeln!(out)?;

    let probed = stats.total_resources - stats.skipped;
    writeln!(out, "Catalog:")?;
    writeln!(
        out,
        "  Found in catalog: {} ({:.1}%)",
        stats.found_in_catalog,
        percentage(stats.found_in_catalog, probed)
    )?;
    writeln!(
        out,
        "  Catalog record links to PURL: {} ({:.1}%)",
        stats.purl_linked_from_catalog,
        percentage(stats.purl_linked_from_catalog, probed)
    )?;
    writeln!(out)?;

    writeln!(out, "PURL:")?;
    writeln!(out, "  Checked: {}", stats.purl_checked)?;
    writeln!(
        out,
        "  Led to database: {} ({:.1}%)",
        stats.purl_led_to_database,
        percentage(stats.purl_led_to_database, stats.purl_checked)
    )?;

    Ok(())
}

fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
