/// Core data structures for leaderboard snapshots
///
/// This module defines the primary data structures used throughout the tool
/// for representing raw source rows, ranked records, and the policies that
/// control ranking.
use std::fmt;
use std::str::FromStr;

/// One row of the source table: column name -> loosely typed cell value.
///
/// CSV sources yield strings for every cell; JSON sources may also carry
/// numbers, bools and nulls.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Source column names recognized by the transform
pub mod column_keys {
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const FEED_WON_TOTAL: &str = "feed_won_total";
    pub const FEED_SPENT_TOTAL: &str = "feed_spent_total";
    /// Older sheets name the spent column without the `feed_` prefix
    pub const SPENT_TOTAL: &str = "spent_total";
    pub const RATIO: &str = "feed_won_to_spent_ratio";
    pub const CONTESTS_COUNT_TOTAL: &str = "contests_count_total";
    pub const LINEUPS_COUNT_TOTAL: &str = "lineups_count_total";
    pub const RANK: &str = "rank";
}

/// A single participant after coercion and ranking
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LeaderboardRecord {
    /// 0-based index of the row in the source table (tie-break key)
    pub position: usize,
    pub username: Option<String>,
    pub feed_spent_total: Option<f64>,
    pub feed_won_total: Option<f64>,
    /// Return on spend, the ranking metric
    pub feed_won_to_spent_ratio: Option<f64>,
    pub contests_count_total: Option<u64>,
    pub lineups_count_total: Option<u64>,
    /// None only for records trailing the ranking because their ratio is missing
    pub rank: Option<u32>,
}

impl LeaderboardRecord {
    /// Create an unranked record with no fields set
    #[cfg(test)]
    pub fn new(position: usize) -> Self {
        Self {
            position,
            username: None,
            feed_spent_total: None,
            feed_won_total: None,
            feed_won_to_spent_ratio: None,
            contests_count_total: None,
            lineups_count_total: None,
            rank: None,
        }
    }

    /// Check if the record took part in ranking
    pub fn is_ranked(&self) -> bool {
        self.rank.is_some()
    }

    /// Username for display, "-" when missing
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("-")
    }
}

/// How ties in the ratio column are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    /// Ties share a rank; the next distinct value gets previous + 1
    #[default]
    Dense,
    /// Every record gets a unique rank; ties keep input order
    Ordinal,
}

impl RankMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankMode::Dense => "dense",
            RankMode::Ordinal => "ordinal",
        }
    }
}

impl FromStr for RankMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dense" => Ok(RankMode::Dense),
            "ordinal" | "first" => Ok(RankMode::Ordinal),
            _ => Err(format!("Unknown rank mode: {} (expected dense or ordinal)", s)),
        }
    }
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to records whose ratio is missing or non-numeric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPolicy {
    /// Keep them after every ranked record, unranked
    #[default]
    Trail,
    /// Remove them before ranking
    Drop,
}

impl NullPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullPolicy::Trail => "trail",
            NullPolicy::Drop => "drop",
        }
    }
}

impl FromStr for NullPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trail" | "last" | "keep" => Ok(NullPolicy::Trail),
            "drop" => Ok(NullPolicy::Drop),
            _ => Err(format!("Unknown null policy: {} (expected trail or drop)", s)),
        }
    }
}

impl fmt::Display for NullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetched, transformed, ranked collection of records
#[derive(Debug, Clone, serde::Serialize)]
pub struct LeaderboardSnapshot {
    /// Human-readable description of where the rows came from
    pub source: String,
    pub fetched_at: chrono::DateTime<chrono::Local>,
    pub records: Vec<LeaderboardRecord>,
}

impl LeaderboardSnapshot {
    pub fn new(source: String, fetched_at: chrono::DateTime<chrono::Local>, records: Vec<LeaderboardRecord>) -> Self {
        Self { source, fetched_at, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fully resolved settings for one run
///
/// Built once from the command line by `config::build_leaderboard_config`
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    pub source: crate::source::DataSource,
    pub rank_mode: RankMode,
    pub null_policy: NullPolicy,
    pub columns: Vec<crate::columns::Column>,
    pub filter_enabled: bool,
    /// Requested minimum ratio; None starts the filter at the lowest observed ratio
    pub min_ratio: Option<f64>,
    /// Rows in the main table
    pub top: usize,
    pub chart: bool,
    pub cache: crate::cache::CacheConfig,
}

impl LeaderboardConfig {
    /// Render settings for the report
    pub fn report_options(&self) -> crate::report::ReportOptions {
        crate::report::ReportOptions {
            rank_mode: self.rank_mode,
            null_policy: self.null_policy,
            columns: self.columns.clone(),
            filter_enabled: self.filter_enabled,
            min_ratio: self.min_ratio,
            top: self.top,
        }
    }
}
