//! Report export functions for JSON and Markdown formats.
//!
//! This module handles exporting a leaderboard report to files for sharing
//! and later analysis.

use super::table::write_report;
use super::types::LeaderboardReport;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Export width used for the code-block tables in Markdown
const EXPORT_WIDTH: usize = 100;

/// Build the JSON document for a report.
///
/// The report itself is embedded as-is, with a generation timestamp and the
/// rendered column labels alongside.
pub fn report_json(report: &LeaderboardReport) -> serde_json::Value {
    use serde_json::json;

    json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "columns": report.columns.iter().map(|c| c.label()).collect::<Vec<_>>(),
        "report": report,
    })
}

/// Export the report as pretty-printed JSON.
pub fn export_json_report(report: &LeaderboardReport, output_path: &Path) -> io::Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &report_json(report))?;
    Ok(())
}

/// Export the report as Markdown.
///
/// Creates a Markdown report that includes:
/// - Header with source and generation time
/// - Summary statistics as a list
/// - The ranked table as a Markdown table
/// - The full console rendering in a code block
pub fn export_markdown_report(report: &LeaderboardReport, output_path: &Path, show_chart: bool) -> io::Result<()> {
    let mut file = File::create(output_path)?;
    write_markdown_report(&mut file, report, show_chart)
}

/// Write the Markdown report to any destination.
pub fn write_markdown_report<W: Write>(writer: &mut W, report: &LeaderboardReport, show_chart: bool) -> io::Result<()> {
    writeln!(writer, "# Leaderboard Report\n")?;
    writeln!(writer, "**Source**: {}", report.source)?;
    writeln!(writer, "**Fetched**: {}", report.fetched_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "**Generated**: {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;

    if let Some(notice) = &report.notice {
        writeln!(writer, "> {}\n", notice)?;
    }

    writeln!(writer, "## Summary\n")?;
    for (key, value) in report.summary.key_values() {
        writeln!(writer, "- **{}**: {}", key, value)?;
    }
    writeln!(writer)?;

    writeln!(writer, "## Leaderboard\n")?;
    write_markdown_table(writer, report)?;

    // Console rendering, no colors
    writeln!(writer, "## Console Output\n")?;
    writeln!(writer, "```")?;
    let mut console = Vec::new();
    write_report(&mut console, report, show_chart, false, EXPORT_WIDTH)?;
    writer.write_all(&console)?;
    writeln!(writer, "```")?;
    Ok(())
}

fn write_markdown_table<W: Write>(writer: &mut W, report: &LeaderboardReport) -> io::Result<()> {
    let table = report.top_table();
    writeln!(writer, "| {} |", table.headers.join(" | "))?;
    let aligns: Vec<&str> = table.columns.iter().map(|c| if c.is_numeric() { "---:" } else { "---" }).collect();
    writeln!(writer, "| {} |", aligns.join(" | "))?;
    if table.is_empty() {
        writeln!(writer, "| {} |", vec!["-"; table.headers.len()].join(" | "))?;
    }
    for row in &table.rows {
        let cells: Vec<String> = row.cells.iter().map(|c| c.replace('|', "\\|")).collect();
        writeln!(writer, "| {} |", cells.join(" | "))?;
    }
    writeln!(writer)
}
