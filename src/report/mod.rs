//! Report generation module - Data transformations and rendering layout.
//!
//! This module handles:
//! - Building the report model from a ranked snapshot
//! - Calculating summary statistics
//! - Laying out the console report (tables, chart, summary)
//! - Export to JSON and Markdown formats
//!
//! Low-level drawing is handled by the console_format module.
//!
//! # Module Organization
//!
//! - `types` - Core rendering types (RankBadge, LeaderboardReport, FilteredView)
//! - `stats` - Summary statistics
//! - `table` - Console report output
//! - `chart` - ROI bar chart
//! - `export` - JSON and Markdown export

mod chart;
mod export;
mod stats;
mod table;
mod types;

// Re-export types
pub use types::{LeaderboardReport, RankBadge, ReportOptions, format_rank};

// Re-export export functions
pub use export::{export_json_report, export_markdown_report, report_json};

// Re-export table functions
pub use table::print_report;
