//! Console report output for a ranked leaderboard.
//!
//! This module lays out the report sections (ranked table, filtered table,
//! chart and summary) and delegates the drawing to console_format.

use super::chart::write_roi_chart;
use super::types::LeaderboardReport;
use crate::console_format::{self, TableLayout, TableWriter};
use std::io::{self, IsTerminal, Write};

/// Print the full report to stdout, colored when stdout is a terminal.
pub fn print_report(report: &LeaderboardReport, show_chart: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let use_colors = stdout.is_terminal();
    let mut lock = stdout.lock();
    write_report(&mut lock, report, show_chart, use_colors, console_format::console_width())?;
    lock.flush()
}

/// Write the full report to any destination.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &LeaderboardReport,
    show_chart: bool,
    use_colors: bool,
    width: usize,
) -> io::Result<()> {
    let layout = TableLayout::for_columns(&report.columns, width);
    let mut out = TableWriter::new(&mut *writer, use_colors);

    out.write_title(&format!("Leaderboard (top {})", report.top.len()))?;
    out.write_table(&report.top_table(), &layout)?;

    if let (Some(view), Some(table)) = (&report.filtered, report.filtered_table()) {
        out.write_title(&format!(
            "Users with ROI >= {:.2} ({} of {})",
            view.threshold,
            view.records.len(),
            report.records.len()
        ))?;
        out.write_table(&table, &layout)?;
    }

    if show_chart {
        write_roi_chart(&mut out, report, layout.total_width())?;
    }

    write_summary(&mut out, report)
}

/// Summary block with source and fetch time.
pub fn write_summary<W: Write>(out: &mut TableWriter<W>, report: &LeaderboardReport) -> io::Result<()> {
    out.write_title("Summary")?;
    let mut pairs = report.summary.key_values();
    pairs.push(("Source", report.source.clone()));
    pairs.push(("Fetched", report.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string()));
    out.write_key_values(&pairs)?;
    out.writeln()
}
