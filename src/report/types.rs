//! Report type definitions for the rendering model.
//!
//! This module defines the type-safe rendering model used to turn a ranked
//! snapshot into displayable tables, charts and exports.

use super::stats::Summary;
use crate::columns::{Column, DisplayTable, MISSING, project};
use crate::filter::{clamp_threshold, filter_by_min_ratio, ratio_bounds};
use crate::types::{LeaderboardRecord, LeaderboardSnapshot, NullPolicy, RankMode};
use term::color::Color;

/// Podium marker for the top three ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBadge {
    /// Rank 1: 🥇
    Gold,
    /// Rank 2: 🥈
    Silver,
    /// Rank 3: 🥉
    Bronze,
}

impl RankBadge {
    /// Badge for a rank, None past the podium.
    pub fn from_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(RankBadge::Gold),
            2 => Some(RankBadge::Silver),
            3 => Some(RankBadge::Bronze),
            _ => None,
        }
    }

    /// Get the medal glyph for this badge.
    pub fn as_str(&self) -> &'static str {
        match self {
            RankBadge::Gold => "🥇",
            RankBadge::Silver => "🥈",
            RankBadge::Bronze => "🥉",
        }
    }

    /// Row color on the console.
    pub fn color(&self) -> Color {
        match self {
            RankBadge::Gold => term::color::BRIGHT_YELLOW,
            RankBadge::Silver => term::color::BRIGHT_WHITE,
            RankBadge::Bronze => term::color::YELLOW, // Brown (YELLOW/33)
        }
    }
}

/// Format a rank for display: medal for 1-3, plain number after, "-" if unranked.
pub fn format_rank(rank: Option<u32>) -> String {
    match rank {
        None => MISSING.to_string(),
        Some(r) => RankBadge::from_rank(r).map_or_else(|| r.to_string(), |b| b.as_str().to_string()),
    }
}

/// Minimum-ratio view over the snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FilteredView {
    /// Threshold after clamping into the observed range
    pub threshold: f64,
    pub records: Vec<LeaderboardRecord>,
}

/// Everything one render pass needs, computed once.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LeaderboardReport {
    pub source: String,
    pub fetched_at: chrono::DateTime<chrono::Local>,
    pub rank_mode: RankMode,
    pub null_policy: NullPolicy,
    #[serde(skip)]
    pub columns: Vec<Column>,
    /// Rows shown in the main table
    pub top: Vec<LeaderboardRecord>,
    /// All records, in ranked order
    pub records: Vec<LeaderboardRecord>,
    pub filtered: Option<FilteredView>,
    /// Observed (min, max) ratio
    pub ratio_bounds: Option<(f64, f64)>,
    pub summary: Summary,
    /// Why the table is empty, when the source could not be loaded
    pub notice: Option<String>,
}

impl LeaderboardReport {
    /// Build the report from a snapshot.
    ///
    /// `min_ratio` is None when filtering is disabled; an enabled filter with
    /// no explicit threshold starts at the lowest observed ratio.
    pub fn build(
        snapshot: &LeaderboardSnapshot,
        options: &ReportOptions,
        notice: Option<String>,
    ) -> Self {
        let bounds = ratio_bounds(&snapshot.records);

        let filtered = if options.filter_enabled {
            let requested = options.min_ratio.or(bounds.map(|(lo, _)| lo));
            requested.map(|t| {
                let threshold = clamp_threshold(t, bounds);
                FilteredView { threshold, records: filter_by_min_ratio(&snapshot.records, threshold) }
            })
        } else {
            None
        };

        LeaderboardReport {
            source: snapshot.source.clone(),
            fetched_at: snapshot.fetched_at,
            rank_mode: options.rank_mode,
            null_policy: options.null_policy,
            columns: options.columns.clone(),
            top: snapshot.records.iter().take(options.top).cloned().collect(),
            records: snapshot.records.clone(),
            filtered,
            ratio_bounds: bounds,
            summary: Summary::from_records(&snapshot.records),
            notice,
        }
    }

    /// Main table projected onto the configured columns.
    pub fn top_table(&self) -> DisplayTable {
        project(&self.top, &self.columns)
    }

    /// Filtered table, if filtering is enabled.
    pub fn filtered_table(&self) -> Option<DisplayTable> {
        self.filtered.as_ref().map(|f| project(&f.records, &self.columns))
    }

    /// Chart bars: the top users by ROI (ranked records only), highest first.
    pub fn chart_bars(&self, limit: usize) -> Vec<(String, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.feed_won_to_spent_ratio.map(|ratio| (r.display_name().to_string(), ratio)))
            .take(limit)
            .collect()
    }
}

/// Render settings taken from the leaderboard configuration.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub rank_mode: RankMode,
    pub null_policy: NullPolicy,
    pub columns: Vec<Column>,
    pub filter_enabled: bool,
    pub min_ratio: Option<f64>,
    pub top: usize,
}
