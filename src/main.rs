//! Database360 main entry point
//!
//! This is the command-line interface for the Database360 catalog checker.

use anyhow::Context;
use clap::Parser;
use database360::config::{load_settings_with_hash, Settings};
use database360::model::{InstitutionConfig, ResourceRecord};
use database360::output::{write_report, write_statistics, Report, RunStatistics};
use database360::probe::run_probes;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Database360: catalog and PURL discoverability checks
///
/// Database360 searches the library catalog for every resource in the holdings
/// sheet, checks that each catalog record links to the resource's PURL, and
/// checks that each PURL leads to the expected database home page. The JSON
/// report is written to stdout.
#[derive(Parser, Debug)]
#[command(name = "database360")]
#[command(version)]
#[command(about = "Catalog and PURL discoverability checks", long_about = None)]
struct Cli {
    /// Path to TOML settings file
    #[arg(value_name = "SETTINGS")]
    settings: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load settings and sheets and show what would be probed without probing
    #[arg(long, conflicts_with = "summary_only")]
    dry_run: bool,

    /// Print only the statistics instead of the JSON report
    #[arg(long)]
    summary_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load settings
    tracing::info!("Loading settings from: {}", cli.settings.display());
    let (settings, settings_hash) = load_settings_with_hash(&cli.settings)
        .with_context(|| format!("failed to load settings from {}", cli.settings.display()))?;
    tracing::info!("Settings loaded successfully (hash: {})", settings_hash);

    // Load institution and resources sheets
    let (institution, resources) = database360::load_sources(&settings)
        .await
        .context("failed to load institution and resource sheets")?;

    if cli.dry_run {
        handle_dry_run(&settings, &institution, &resources);
        return Ok(());
    }

    // Probe every resource
    let results = run_probes(&institution, &resources, &settings.probe).await?;

    // Report
    if cli.summary_only {
        let stats = RunStatistics::from_results(&results);
        write_statistics(&stats, &mut std::io::stdout().lock())?;
    } else {
        let report = Report::new(settings_hash, results);
        write_report(&report, std::io::stdout().lock())?;
        if !cli.quiet {
            write_statistics(&report.statistics, &mut std::io::stderr().lock())?;
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("database360=info,warn"),
            1 => EnvFilter::new("database360=debug,info"),
            2 => EnvFilter::new("database360=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the loaded configuration and resources
fn handle_dry_run(settings: &Settings, institution: &InstitutionConfig, resources: &[ResourceRecord]) {
    println!("=== Database360 Dry Run ===\n");

    println!("Probe Settings:");
    println!("  Delay between resources: {}ms", settings.probe.delay_ms);
    println!("  Catalog timeout: {}s", settings.probe.catalog_timeout_secs);
    println!("  PURL timeout: {}s", settings.probe.purl_timeout_secs);
    println!("  User agent: {}", settings.probe.user_agent);

    println!("\nInstitution Configuration:");
    for (key, value) in institution.iter() {
        println!("  {}: {}", key, value);
    }

    println!("\nResources ({}):", resources.len());
    for resource in resources {
        println!(
            "  - {} [purl: {}, expected text: {}]",
            resource.name().unwrap_or("(no database name)"),
            resource.purl().unwrap_or("-"),
            resource.expected_text().unwrap_or("-")
        );
    }

    let probed = resources.iter().filter(|r| r.name().is_some()).count();
    println!("\n✓ Configuration is valid");
    println!("✓ Would probe {} of {} resources", probed, resources.len());
}
