/// Tests for console formatting module
///
/// These tests ensure console output formatting remains stable.

#[cfg(test)]
mod tests {
    use crate::columns::{Column, DisplayRow, DisplayTable, project};
    use crate::console_format::*;
    use crate::types::LeaderboardRecord;

    /// Standard width for tests to ensure reproducible output
    const TEST_CONSOLE_WIDTH: usize = 120;

    fn record(name: &str, ratio: f64, rank: u32) -> LeaderboardRecord {
        let mut r = LeaderboardRecord::new(rank as usize);
        r.username = Some(name.to_string());
        r.feed_won_to_spent_ratio = Some(ratio);
        r.rank = Some(rank);
        r
    }

    /// Render a whole table to a string without colors
    fn format_table(table: &DisplayTable, layout: &TableLayout) -> String {
        let mut buffer = Vec::new();
        TableWriter::new(&mut buffer, false).write_table(table, layout).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_display_width_unicode() {
        assert_eq!(display_width("│"), 1);
        assert_eq!(display_width("█"), 1);
        // Medal emoji are double width
        assert_eq!(display_width("🥇"), 2);
    }

    #[test]
    fn test_truncate_with_padding_exact_fit() {
        assert_eq!(truncate_with_padding("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_with_padding_needs_padding() {
        assert_eq!(truncate_with_padding("hi", 5), "hi   ");
    }

    #[test]
    fn test_truncate_with_padding_needs_truncation() {
        let result = truncate_with_padding("hello world", 8);
        assert_eq!(result, "hello...");
        assert_eq!(display_width(&result), 8);
    }

    #[test]
    fn test_truncate_with_padding_unicode() {
        let result = truncate_with_padding("🥇🥈🥉 podium", 7);
        assert_eq!(display_width(&result), 7);
    }

    #[test]
    fn test_pad_left() {
        assert_eq!(pad_left("2.50", 6), "  2.50");
        assert_eq!(pad_left("🥇", 4), "  🥇");
    }

    #[test]
    fn test_layout_default_columns_fit() {
        let layout = TableLayout::for_columns(&Column::default_set(), TEST_CONSOLE_WIDTH);
        assert_eq!(layout.widths, vec![6, 24, 14, 14, 8]);
        assert_eq!(layout.right_align, vec![false, false, true, true, true]);
        assert_eq!(layout.total_width(), 82);
    }

    #[test]
    fn test_layout_shrinks_username_first() {
        let layout = TableLayout::for_columns(&Column::default_set(), 60);
        assert_eq!(layout.widths, vec![6, 8, 14, 14, 8]);
    }

    #[test]
    fn test_layout_header_wider_than_hint() {
        let layout = TableLayout::for_columns(&[Column::Ratio, Column::FeedWonTotal], TEST_CONSOLE_WIDTH);
        assert!(layout.widths[1] >= "Total Winnings".len());
    }

    #[test]
    fn test_format_table_lines_have_equal_width() {
        let records = vec![record("alice", 2.5, 1), record("bob", 1.25, 2), record("carol", 0.5, 4)];
        let table = project(&records, &Column::default_set());
        let layout = TableLayout::for_columns(&table.columns, TEST_CONSOLE_WIDTH);
        let output = format_table(&table, &layout);

        let lines: Vec<&str> = output.lines().collect();
        // top, header, separator, 3 rows, bottom
        assert_eq!(lines.len(), 7);
        for line in &lines {
            assert_eq!(display_width(line), layout.total_width(), "line: {}", line);
        }
        assert!(output.contains("alice"));
        assert!(output.contains("🥇"));
        assert!(output.contains("🥈"));
        assert!(lines[5].contains(" 4 "));
    }

    #[test]
    fn test_format_table_empty() {
        let table = DisplayTable { columns: vec![Column::Username], headers: vec!["Username".to_string()], rows: vec![] };
        let layout = TableLayout::for_columns(&table.columns, TEST_CONSOLE_WIDTH);
        let output = format_table(&table, &layout);
        assert!(output.contains("No data"));
    }

    #[test]
    fn test_colored_rows_only_on_podium() {
        let table = DisplayTable {
            columns: vec![Column::Username],
            headers: vec!["Username".to_string()],
            rows: vec![
                DisplayRow { cells: vec!["gold".to_string()], rank: Some(1) },
                DisplayRow { cells: vec!["fourth".to_string()], rank: Some(4) },
            ],
        };
        let layout = TableLayout::for_columns(&table.columns, TEST_CONSOLE_WIDTH);
        let mut buffer = Vec::new();
        TableWriter::new(&mut buffer, true).write_table(&table, &layout).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let gold_line = output.lines().find(|l| l.contains("gold")).unwrap();
        let fourth_line = output.lines().find(|l| l.contains("fourth")).unwrap();
        assert!(gold_line.starts_with("\x1b[93m"));
        assert!(gold_line.ends_with("\x1b[0m"));
        assert!(!fourth_line.contains("\x1b["));
    }

    #[test]
    fn test_ansi_codes_follow_term_palette() {
        assert_eq!(ansi_code(term::color::YELLOW), 33);
        assert_eq!(ansi_code(term::color::BRIGHT_YELLOW), 93);
        assert_eq!(ansi_code(term::color::BRIGHT_WHITE), 97);
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let bars = vec![("alice".to_string(), 4.0), ("bob".to_string(), 2.0), ("zero".to_string(), 0.0)];
        let mut buffer = Vec::new();
        TableWriter::new(&mut buffer, false).write_bar_chart(&bars, 60, "ROI").unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let count = |name: &str| output.lines().find(|l| l.contains(name)).unwrap().matches('█').count();
        assert_eq!(count("alice"), 2 * count("bob"));
        assert_eq!(count("zero"), 0);
        assert!(output.contains("4.00"));
        assert!(output.contains("ROI"));
    }

    #[test]
    fn test_bar_chart_empty() {
        let mut buffer = Vec::new();
        TableWriter::new(&mut buffer, false).write_bar_chart(&[], 60, "ROI").unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("no data"));
    }
}
