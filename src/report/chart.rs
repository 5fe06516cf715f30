//! Horizontal ROI bar chart.

use super::types::LeaderboardReport;
use crate::console_format::TableWriter;
use std::io::{self, Write};

/// Number of users shown in the chart
pub const CHART_LIMIT: usize = 10;

pub const CHART_AXIS_LABEL: &str = "Return on Investment (ROI)";

/// Write the top users by ROI as a bar chart.
pub fn write_roi_chart<W: Write>(out: &mut TableWriter<W>, report: &LeaderboardReport, width: usize) -> io::Result<()> {
    let bars = report.chart_bars(CHART_LIMIT);
    out.write_title(&format!("Top {} Users by ROI", bars.len()))?;
    out.write_bar_chart(&bars, width, CHART_AXIS_LABEL)
}
