//! Aggregation and reporting of scenario results.
//!
//! This module runs scenario suites, derives cross-scenario comparisons and
//! writes JSON and text reports.

pub mod types;
pub mod aggregator;
pub mod report;

pub use types::*;
pub use aggregator::{scenario_seed, ReportAggregator};
pub use report::{generate_json_report, generate_text_report, print_summary, render_summary};
