//! Summary statistics for a ranked leaderboard.
//!
//! This module aggregates records into the headline numbers shown under the
//! tables and written to exports.

use crate::types::LeaderboardRecord;

/// Aggregate numbers over one collection of records.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Summary {
    pub participants: usize,
    pub ranked: usize,
    /// Mean over present ratios, None when no record has one
    pub mean_ratio: Option<f64>,
    pub total_contests: u64,
    pub total_lineups: u64,
    pub total_spent: f64,
    pub total_won: f64,
    /// Username of the first rank-1 record
    pub top: Option<String>,
}

impl Summary {
    /// Calculate summary statistics from records.
    ///
    /// Missing values are skipped rather than counted as zero, so the mean
    /// is taken over the records that actually have a ratio.
    pub fn from_records(records: &[LeaderboardRecord]) -> Self {
        let ratios: Vec<f64> = records.iter().filter_map(|r| r.feed_won_to_spent_ratio).collect();
        let mean_ratio = if ratios.is_empty() { None } else { Some(ratios.iter().sum::<f64>() / ratios.len() as f64) };

        Summary {
            participants: records.len(),
            ranked: records.iter().filter(|r| r.is_ranked()).count(),
            mean_ratio,
            total_contests: records.iter().filter_map(|r| r.contests_count_total).sum(),
            total_lineups: records.iter().filter_map(|r| r.lineups_count_total).sum(),
            total_spent: records.iter().filter_map(|r| r.feed_spent_total).sum(),
            total_won: records.iter().filter_map(|r| r.feed_won_total).sum(),
            top: records.iter().find(|r| r.rank == Some(1)).and_then(|r| r.username.clone()),
        }
    }

    /// Mean ratio for display, "-" when undefined.
    pub fn mean_ratio_display(&self) -> String {
        self.mean_ratio.map_or_else(|| crate::columns::MISSING.to_string(), |m| format!("{:.2}", m))
    }

    /// Labelled lines for the console summary block and Markdown export.
    pub fn key_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Participants", self.participants.to_string()),
            ("Ranked", self.ranked.to_string()),
            ("Average ROI", self.mean_ratio_display()),
            ("Total Contests", self.total_contests.to_string()),
            ("Total Lineups", self.total_lineups.to_string()),
            ("Total Spent", format!("{:.2}", self.total_spent)),
            ("Total Winnings", format!("{:.2}", self.total_won)),
            ("Leader", self.top.clone().unwrap_or_else(|| crate::columns::MISSING.to_string())),
        ]
    }
}
