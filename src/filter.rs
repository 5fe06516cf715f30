/// Minimum-ratio filtering over a ranked record list
///
/// Filtering never re-ranks: records keep the rank they were given over the
/// full collection.
use crate::types::LeaderboardRecord;
use log::warn;

/// Smallest and largest ratio present, or None when no record has one
pub fn ratio_bounds(records: &[LeaderboardRecord]) -> Option<(f64, f64)> {
    records.iter().filter_map(|r| r.feed_won_to_spent_ratio).fold(None, |acc, ratio| match acc {
        None => Some((ratio, ratio)),
        Some((lo, hi)) => Some((lo.min(ratio), hi.max(ratio))),
    })
}

/// Clamp a requested threshold into the observed ratio range
///
/// With no bounds (empty collection) the threshold is returned as is.
pub fn clamp_threshold(threshold: f64, bounds: Option<(f64, f64)>) -> f64 {
    let Some((lo, hi)) = bounds else {
        return threshold;
    };

    let clamped = threshold.clamp(lo, hi);
    if clamped != threshold {
        warn!("minimum ratio {:.2} is outside the observed range [{:.2}, {:.2}], using {:.2}", threshold, lo, hi, clamped);
    }
    clamped
}

/// Records whose ratio is at least `threshold`, in their original order
///
/// Records with a missing ratio never pass.
pub fn filter_by_min_ratio(records: &[LeaderboardRecord], threshold: f64) -> Vec<LeaderboardRecord> {
    records
        .iter()
        .filter(|r| r.feed_won_to_spent_ratio.is_some_and(|ratio| ratio >= threshold))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: usize, ratio: Option<f64>, rank: Option<u32>) -> LeaderboardRecord {
        let mut r = LeaderboardRecord::new(position);
        r.username = Some(format!("user{}", position));
        r.feed_won_to_spent_ratio = ratio;
        r.rank = rank;
        r
    }

    fn ranked_fixture() -> Vec<LeaderboardRecord> {
        vec![
            record(2, Some(3.0), Some(1)),
            record(0, Some(2.0), Some(2)),
            record(3, Some(2.0), Some(2)),
            record(1, Some(0.5), Some(3)),
        ]
    }

    #[test]
    fn test_bounds_empty() {
        assert_eq!(ratio_bounds(&[]), None);
        assert_eq!(ratio_bounds(&[record(0, None, None)]), None);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(ratio_bounds(&ranked_fixture()), Some((0.5, 3.0)));
    }

    #[test]
    fn test_filter_empty_is_noop() {
        assert!(filter_by_min_ratio(&[], 1.0).is_empty());
    }

    #[test]
    fn test_filter_at_minimum_returns_everything() {
        let records = ranked_fixture();
        let (lo, _) = ratio_bounds(&records).unwrap();
        assert_eq!(filter_by_min_ratio(&records, lo), records);
    }

    #[test]
    fn test_filter_above_maximum_returns_nothing() {
        let records = ranked_fixture();
        let (_, hi) = ratio_bounds(&records).unwrap();
        assert!(filter_by_min_ratio(&records, hi + 0.01).is_empty());
    }

    #[test]
    fn test_filter_is_monotonic() {
        let records = ranked_fixture();
        let mut previous = usize::MAX;
        for step in 0..=40 {
            let threshold = step as f64 * 0.1;
            let size = filter_by_min_ratio(&records, threshold).len();
            assert!(size <= previous, "threshold {} grew the result", threshold);
            previous = size;
        }
    }

    #[test]
    fn test_filter_keeps_order_and_ranks() {
        let filtered = filter_by_min_ratio(&ranked_fixture(), 2.0);
        let summary: Vec<(usize, Option<u32>)> = filtered.iter().map(|r| (r.position, r.rank)).collect();
        assert_eq!(summary, vec![(2, Some(1)), (0, Some(2)), (3, Some(2))]);
    }

    #[test]
    fn test_filter_excludes_missing_ratio() {
        let mut records = ranked_fixture();
        records.push(record(4, None, None));
        let filtered = filter_by_min_ratio(&records, f64::MIN);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_clamp_threshold() {
        let bounds = Some((0.5, 3.0));
        assert_eq!(clamp_threshold(1.0, bounds), 1.0);
        assert_eq!(clamp_threshold(-2.0, bounds), 0.5);
        assert_eq!(clamp_threshold(10.0, bounds), 3.0);
        assert_eq!(clamp_threshold(10.0, None), 10.0);
    }
}
