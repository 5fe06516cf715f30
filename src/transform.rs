/// Leaderboard transform - raw rows to ranked records
///
/// This module handles:
/// - Numeric coercion of the amount, ratio and counter columns
/// - Username derivation from the email column
/// - Dense or ordinal ranking over the ratio column
/// - Dropping or trailing records whose ratio is missing
///
/// Every step is presence-checked: a column missing from the source table
/// just leaves the corresponding field empty.
use crate::types::column_keys as keys;
use crate::types::{LeaderboardRecord, NullPolicy, RankMode, RawRow};
use log::{debug, trace};
use serde_json::Value;
use std::cmp::Ordering;

/// Convert raw source rows into a ranked, totally ordered record list
///
/// An empty input short-circuits to an empty result.
pub fn transform(rows: &[RawRow], rank_mode: RankMode, null_policy: NullPolicy) -> Vec<LeaderboardRecord> {
    if rows.is_empty() {
        debug!("no rows to transform");
        return Vec::new();
    }

    let records: Vec<LeaderboardRecord> = rows.iter().enumerate().map(|(i, row)| coerce_row(i, row)).collect();
    let ranked = assign_ranks(records, rank_mode, null_policy);

    debug!(
        "transformed {} rows into {} records ({} ranked, mode={}, nulls={})",
        rows.len(),
        ranked.len(),
        ranked.iter().filter(|r| r.is_ranked()).count(),
        rank_mode,
        null_policy
    );

    ranked
}

/// Build a typed record from one raw row (no rank yet)
pub fn coerce_row(position: usize, row: &RawRow) -> LeaderboardRecord {
    let spent = row.get(keys::FEED_SPENT_TOTAL).or_else(|| row.get(keys::SPENT_TOTAL));

    LeaderboardRecord {
        position,
        username: username_for(row),
        feed_spent_total: coerce_number(spent),
        feed_won_total: coerce_number(row.get(keys::FEED_WON_TOTAL)),
        feed_won_to_spent_ratio: coerce_number(row.get(keys::RATIO)),
        contests_count_total: coerce_count(row.get(keys::CONTESTS_COUNT_TOTAL)),
        lineups_count_total: coerce_count(row.get(keys::LINEUPS_COUNT_TOTAL)),
        rank: None,
    }
}

/// Parse a loosely typed cell as a finite number
///
/// Numbers pass through. Strings are trimmed and parsed; thousands separators
/// from formatted spreadsheet exports are tolerated. Anything else (empty
/// strings, text, bools, nulls, non-finite values) is missing.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            trace!("coercion to number failed for {:?}", value);
            None
        }
    }
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().or_else(|| {
        if trimmed.contains(',') {
            trimmed.replace(',', "").parse::<f64>().ok()
        } else {
            None
        }
    })
}

/// Parse a loosely typed cell as a non-negative whole counter
pub fn coerce_count(value: Option<&Value>) -> Option<u64> {
    let n = coerce_number(value)?;
    if n < 0.0 || n.fract() != 0.0 || n >= u64::MAX as f64 {
        trace!("value {} is not a valid counter", n);
        return None;
    }
    Some(n as u64)
}

/// Username for a row: `username` verbatim if the column is present,
/// otherwise derived from `email`
pub fn username_for(row: &RawRow) -> Option<String> {
    if let Some(value) = row.get(keys::USERNAME) {
        return value_to_text(value);
    }

    row.get(keys::EMAIL).map(derive_username).and_then(|v| value_to_text(&v))
}

/// Local part of an email address (before the first `@`)
///
/// A bare username is returned unchanged; non-string values pass through.
pub fn derive_username(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(local_part(s).to_string()),
        other => other.clone(),
    }
}

fn local_part(s: &str) -> &str {
    s.split_once('@').map_or(s, |(local, _)| local)
}

/// Display text for a cell; null is missing
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Sort records by descending ratio and assign ranks
///
/// Records without a ratio never receive a rank. Depending on the null
/// policy they are removed or appended after the ranked records in their
/// original order.
pub fn assign_ranks(
    records: Vec<LeaderboardRecord>,
    rank_mode: RankMode,
    null_policy: NullPolicy,
) -> Vec<LeaderboardRecord> {
    let (mut ranked, unranked): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|r| r.feed_won_to_spent_ratio.is_some());

    ranked.sort_by(compare_by_ratio_desc);

    match rank_mode {
        RankMode::Dense => {
            let mut rank = 0u32;
            let mut previous: Option<f64> = None;
            for record in ranked.iter_mut() {
                let ratio = record.feed_won_to_spent_ratio;
                if previous != ratio {
                    rank += 1;
                    previous = ratio;
                }
                record.rank = Some(rank);
            }
        }
        RankMode::Ordinal => {
            for (i, record) in ranked.iter_mut().enumerate() {
                record.rank = Some(i as u32 + 1);
            }
        }
    }

    match null_policy {
        NullPolicy::Drop => {
            if !unranked.is_empty() {
                debug!("dropping {} records with a missing ratio", unranked.len());
            }
        }
        NullPolicy::Trail => {
            ranked.extend(unranked.into_iter().map(|mut r| {
                r.rank = None;
                r
            }));
        }
    }

    ranked
}

/// Highest ratio first; equal ratios keep source order
fn compare_by_ratio_desc(a: &LeaderboardRecord, b: &LeaderboardRecord) -> Ordering {
    let ra = a.feed_won_to_spent_ratio.unwrap_or(f64::NEG_INFINITY);
    let rb = b.feed_won_to_spent_ratio.unwrap_or(f64::NEG_INFINITY);
    rb.partial_cmp(&ra).unwrap_or(Ordering::Equal).then(a.position.cmp(&b.position))
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;
