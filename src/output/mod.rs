//! Output module for run reports
//!
//! This module handles:
//! - Counting probe outcomes across a run
//! - Rendering those counts for the console
//! - Serializing the full run report as JSON

mod report;
pub mod stats;

pub use report::{write_report, Report};
pub use stats::{write_statistics, RunStatistics};
