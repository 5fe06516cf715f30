/// Console formatting module - Pure rendering concerns
///
/// This module handles all console output formatting including:
/// - Table layout and borders
/// - Color terminal output
/// - Text truncation and padding
/// - Horizontal bar charts
///
/// It accepts pre-formatted data from the report module and renders it.
///
/// ## Output Flexibility
///
/// Everything goes through `TableWriter`, which writes to any
/// `std::io::Write` destination (stdout, string buffers, files) with
/// optional colors.
use crate::columns::{Column, DisplayTable};
use crate::report::RankBadge;
use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest a text column may be squeezed to
const MIN_TEXT_WIDTH: usize = 8;

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Write formatted text, optionally with color
    fn write_colored(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(c) if self.use_colors => write!(self.writer, "\x1b[{}m{}\x1b[0m", ansi_code(c), text),
            _ => write!(self.writer, "{}", text),
        }
    }

    /// Write a section title followed by a blank line
    pub fn write_title(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.writer, "\n{}\n", title)
    }

    /// Write a complete boxed table
    pub fn write_table(&mut self, table: &DisplayTable, layout: &TableLayout) -> io::Result<()> {
        write!(self.writer, "{}", format_top_border(layout))?;
        write!(self.writer, "{}", format_header_row(layout, &table.headers))?;
        write!(self.writer, "{}", format_separator(layout))?;

        if table.rows.is_empty() {
            self.write_empty_row(layout, "No data")?;
        }
        for row in &table.rows {
            let color = row.rank.and_then(RankBadge::from_rank).map(|b| b.color());
            let line = format_cells(layout, &row.cells);
            self.write_colored(&line, color)?;
            writeln!(self.writer)?;
        }

        write!(self.writer, "{}", format_bottom_border(layout))
    }

    /// Write a single full-width message row inside the box
    pub fn write_empty_row(&mut self, layout: &TableLayout, message: &str) -> io::Result<()> {
        let inner = layout.inner_width();
        writeln!(self.writer, "│ {} │", truncate_with_padding(message, inner.saturating_sub(2)))
    }

    /// Write labelled key/value lines
    pub fn write_key_values(&mut self, pairs: &[(&str, String)]) -> io::Result<()> {
        let label_width = pairs.iter().map(|(k, _)| display_width(k)).max().unwrap_or(0) + 1;
        for (key, value) in pairs {
            writeln!(self.writer, "  {} {}", pad_right(&format!("{}:", key), label_width), value)?;
        }
        Ok(())
    }

    /// Write a horizontal bar chart, one bar per (label, value)
    ///
    /// Bars are scaled to the largest positive value; non-positive values
    /// get an empty bar. Each bar is followed by its value to 2 decimals.
    pub fn write_bar_chart(&mut self, bars: &[(String, f64)], total_width: usize, axis_label: &str) -> io::Result<()> {
        if bars.is_empty() {
            return writeln!(self.writer, "  (no data)");
        }

        let label_width = bars.iter().map(|(l, _)| display_width(l)).max().unwrap_or(0).min(24);
        let value_width = bars.iter().map(|(_, v)| format!("{:.2}", v).len()).max().unwrap_or(4);
        // "  label │bar value"
        let bar_area = total_width.saturating_sub(2 + label_width + 2 + 1 + value_width).max(10);
        let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

        for (label, value) in bars {
            let len = if max > 0.0 && *value > 0.0 { ((value / max) * bar_area as f64).round() as usize } else { 0 };
            writeln!(
                self.writer,
                "  {} │{} {:.2}",
                truncate_with_padding(label, label_width),
                "█".repeat(len),
                value
            )?;
        }
        writeln!(self.writer, "  {} └{}", " ".repeat(label_width), "─".repeat(bar_area))?;
        writeln!(self.writer, "  {}  {}", " ".repeat(label_width), axis_label)
    }

    /// Write a newline
    pub fn writeln(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }
}

/// ANSI SGR code for a term color (bright colors map to 90-97)
///
/// `term` terminals depend on the terminfo entry for `$TERM`; a `TableWriter`
/// may target a buffer or a file, so the escape is written here.
fn ansi_code(color: Color) -> u32 {
    if color < 8 { 30 + color } else { 90 + (color - 8) }
}

//
// Table Layout and Widths
//

/// Column widths for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Content width of each column (padding and borders excluded)
    pub widths: Vec<usize>,
    pub right_align: Vec<bool>,
}

impl TableLayout {
    /// Compute widths from column hints, fitted into the terminal width
    ///
    /// Each column is at least as wide as its header. When the table is too
    /// wide, the username column gives up space first.
    pub fn for_columns(columns: &[Column], terminal_width: usize) -> Self {
        let widths: Vec<usize> = columns.iter().map(|c| c.spec().width.max(display_width(c.label()))).collect();
        let right_align = columns.iter().map(|c| c.is_numeric()).collect();

        let mut layout = TableLayout { widths, right_align };
        let overflow = layout.total_width().saturating_sub(terminal_width);
        if overflow > 0
            && let Some(i) = columns.iter().position(|c| *c == Column::Username)
        {
            let floor = MIN_TEXT_WIDTH.max(display_width(Column::Username.label()));
            layout.widths[i] = layout.widths[i].saturating_sub(overflow).max(floor);
        }
        layout
    }

    /// Full rendered width including borders and padding
    pub fn total_width(&self) -> usize {
        // "│ " before each cell, " " after, plus the closing "│"
        self.widths.iter().map(|w| w + 3).sum::<usize>() + 1
    }

    /// Width between the outer borders
    pub fn inner_width(&self) -> usize {
        self.total_width().saturating_sub(2)
    }
}

/// Get terminal width or default to 120
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() { w as usize } else { 120 }
}

// Console width override (set once from --console-width)
static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Force the console width used for layout (for tests and piping)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width); // Ignore error if already initialized
}

/// Console width: override if set, else detected terminal width
pub fn console_width() -> usize {
    CONSOLE_WIDTH.get().copied().unwrap_or_else(get_terminal_width)
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        pad_right(s, width)
    }
}

/// Pad with trailing spaces to reach the display width
pub fn pad_right(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(padding))
}

/// Pad with leading spaces to reach the display width (truncating if longer)
pub fn pad_left(s: &str, width: usize) -> String {
    if display_width(s) > width {
        return truncate_with_padding(s, width);
    }
    let padding = width - display_width(s);
    format!("{}{}", " ".repeat(padding), s)
}

//
// Border and Row Rendering
//

fn format_border(layout: &TableLayout, left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = layout.widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&mid.to_string()), right)
}

/// Top border: ┌───┬───┐
pub fn format_top_border(layout: &TableLayout) -> String {
    format_border(layout, '┌', '┬', '┐')
}

/// Separator between header and body: ├───┼───┤
pub fn format_separator(layout: &TableLayout) -> String {
    format_border(layout, '├', '┼', '┤')
}

/// Bottom border: └───┴───┘
pub fn format_bottom_border(layout: &TableLayout) -> String {
    format_border(layout, '└', '┴', '┘')
}

/// Header row with centered labels
pub fn format_header_row(layout: &TableLayout, headers: &[String]) -> String {
    let cells: Vec<String> = headers
        .iter()
        .zip(&layout.widths)
        .map(|(h, w)| {
            let text = truncate_with_padding(h, *w);
            let trimmed = text.trim_end();
            let free = w.saturating_sub(display_width(trimmed));
            format!("{}{}{}", " ".repeat(free / 2), trimmed, " ".repeat(free - free / 2))
        })
        .collect();
    format!("│ {} │\n", cells.join(" │ "))
}

/// Body row (no trailing newline) with per-column alignment
pub fn format_cells(layout: &TableLayout, cells: &[String]) -> String {
    let rendered: Vec<String> = cells
        .iter()
        .zip(layout.widths.iter().zip(&layout.right_align))
        .map(|(cell, (w, right))| if *right { pad_left(cell, *w) } else { truncate_with_padding(cell, *w) })
        .collect();
    format!("│ {} │", rendered.join(" │ "))
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
