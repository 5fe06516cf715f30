/// Column projection - select, rename and format record fields for display
///
/// The display layer never sees a `LeaderboardRecord` directly: it gets a
/// `DisplayTable` of pre-formatted strings with labelled headers.
use crate::report::format_rank;
use crate::types::LeaderboardRecord;
use crate::types::column_keys as keys;
use std::str::FromStr;

/// Placeholder rendered for a missing value
pub const MISSING: &str = "-";

/// A projectable leaderboard column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Column {
    Rank,
    Username,
    FeedWonTotal,
    FeedSpentTotal,
    Ratio,
    ContestsCount,
    LineupsCount,
}

/// How a column's values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Fixed two decimals (ratios, amounts)
    Fixed2,
    /// Whole number (counters)
    Integer,
    /// Rank with medal glyphs for the podium
    Medal,
    /// Free text
    Text,
}

/// Display configuration for one column
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Raw source column name
    pub key: &'static str,
    /// Header label
    pub label: &'static str,
    pub format: NumberFormat,
    /// Preferred content width (characters, excluding padding)
    pub width: usize,
    pub help: &'static str,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Rank,
        Column::Username,
        Column::FeedWonTotal,
        Column::FeedSpentTotal,
        Column::Ratio,
        Column::ContestsCount,
        Column::LineupsCount,
    ];

    /// Columns shown when none are requested
    pub fn default_set() -> Vec<Column> {
        vec![Column::Rank, Column::Username, Column::FeedWonTotal, Column::FeedSpentTotal, Column::Ratio]
    }

    pub fn spec(&self) -> ColumnSpec {
        match self {
            Column::Rank => ColumnSpec {
                key: keys::RANK,
                label: "Rank",
                format: NumberFormat::Medal,
                width: 6,
                help: "Position by ROI; ties share a rank in dense mode",
            },
            Column::Username => ColumnSpec {
                key: keys::USERNAME,
                label: "Username",
                format: NumberFormat::Text,
                width: 24,
                help: "Username, or the part of the email before '@'",
            },
            Column::FeedWonTotal => ColumnSpec {
                key: keys::FEED_WON_TOTAL,
                label: "Total Winnings",
                format: NumberFormat::Fixed2,
                width: 14,
                help: "Total amount won",
            },
            Column::FeedSpentTotal => ColumnSpec {
                key: keys::FEED_SPENT_TOTAL,
                label: "Total Spent",
                format: NumberFormat::Fixed2,
                width: 14,
                help: "Total amount spent on entries",
            },
            Column::Ratio => ColumnSpec {
                key: keys::RATIO,
                label: "ROI",
                format: NumberFormat::Fixed2,
                width: 8,
                help: "Return on investment: winnings divided by spend",
            },
            Column::ContestsCount => ColumnSpec {
                key: keys::CONTESTS_COUNT_TOTAL,
                label: "Contests",
                format: NumberFormat::Integer,
                width: 9,
                help: "Number of contests entered",
            },
            Column::LineupsCount => ColumnSpec {
                key: keys::LINEUPS_COUNT_TOTAL,
                label: "Lineups",
                format: NumberFormat::Integer,
                width: 9,
                help: "Number of lineups submitted",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    /// Format this column's value for one record
    pub fn format_value(&self, record: &LeaderboardRecord) -> String {
        match self {
            Column::Rank => format_rank(record.rank),
            Column::Username => record.display_name().to_string(),
            Column::FeedWonTotal => format_fixed2(record.feed_won_total),
            Column::FeedSpentTotal => format_fixed2(record.feed_spent_total),
            Column::Ratio => format_fixed2(record.feed_won_to_spent_ratio),
            Column::ContestsCount => format_integer(record.contests_count_total),
            Column::LineupsCount => format_integer(record.lineups_count_total),
        }
    }

    /// Whether values are right-aligned in tables
    pub fn is_numeric(&self) -> bool {
        matches!(self.spec().format, NumberFormat::Fixed2 | NumberFormat::Integer)
    }
}

impl FromStr for Column {
    type Err = String;

    /// Accepts raw keys, labels, and a few short aliases (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "roi" | "ratio" => return Ok(Column::Ratio),
            "spent" | "spent_total" => return Ok(Column::FeedSpentTotal),
            "won" | "winnings" => return Ok(Column::FeedWonTotal),
            "user" | "email" => return Ok(Column::Username),
            "contests" => return Ok(Column::ContestsCount),
            "lineups" => return Ok(Column::LineupsCount),
            _ => {}
        }

        Column::ALL
            .iter()
            .find(|c| {
                let spec = c.spec();
                spec.key == wanted || spec.label.to_lowercase() == wanted
            })
            .copied()
            .ok_or_else(|| format!("Unknown column: {}", s))
    }
}

/// Parse a comma-separated column list, rejecting duplicates
pub fn parse_column_list(s: &str) -> Result<Vec<Column>, String> {
    let mut columns = Vec::new();
    for part in s.split(',').filter(|p| !p.trim().is_empty()) {
        let column = Column::from_str(part)?;
        if columns.contains(&column) {
            return Err(format!("Column listed twice: {}", column.label()));
        }
        columns.push(column);
    }
    if columns.is_empty() {
        return Err("Column list is empty".to_string());
    }
    Ok(columns)
}

fn format_fixed2(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}", v))
}

fn format_integer(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// One projected row
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DisplayRow {
    pub cells: Vec<String>,
    /// Kept for styling (podium colors); not rendered as its own cell
    #[serde(skip)]
    pub rank: Option<u32>,
}

/// Records projected onto a column set, all values pre-formatted
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DisplayTable {
    #[serde(skip)]
    pub columns: Vec<Column>,
    pub headers: Vec<String>,
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project records onto the requested columns, in the requested order
pub fn project(records: &[LeaderboardRecord], columns: &[Column]) -> DisplayTable {
    let headers = columns.iter().map(|c| c.label().to_string()).collect();
    let rows = records
        .iter()
        .map(|record| DisplayRow { cells: columns.iter().map(|c| c.format_value(record)).collect(), rank: record.rank })
        .collect();

    DisplayTable { columns: columns.to_vec(), headers, rows }
}
