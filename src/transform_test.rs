/// Tests for the leaderboard transform
///
/// These cover coercion, username derivation, both ranking modes and both
/// null policies.

#[cfg(test)]
mod tests {
    use crate::transform::*;
    use crate::types::{LeaderboardRecord, NullPolicy, RankMode, RawRow};
    use serde_json::{Value, json};

    /// Build a raw row from a JSON object literal
    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn rows(values: Vec<Value>) -> Vec<RawRow> {
        values.into_iter().map(row).collect()
    }

    fn ranks_by_name(records: &[LeaderboardRecord]) -> Vec<(String, Option<u32>)> {
        records.iter().map(|r| (r.display_name().to_string(), r.rank)).collect()
    }

    fn tied_fixture() -> Vec<RawRow> {
        rows(vec![
            json!({"username": "a", "feed_won_to_spent_ratio": "2.5"}),
            json!({"username": "b", "feed_won_to_spent_ratio": "2.5"}),
            json!({"username": "c", "feed_won_to_spent_ratio": "1.0"}),
        ])
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(transform(&[], RankMode::Dense, NullPolicy::Trail).is_empty());
        assert!(transform(&[], RankMode::Ordinal, NullPolicy::Drop).is_empty());
    }

    #[test]
    fn test_dense_ranking_ties_share_rank() {
        let records = transform(&tied_fixture(), RankMode::Dense, NullPolicy::Trail);
        assert_eq!(
            ranks_by_name(&records),
            vec![("a".to_string(), Some(1)), ("b".to_string(), Some(1)), ("c".to_string(), Some(2))]
        );
    }

    #[test]
    fn test_ordinal_ranking_breaks_ties_by_input_order() {
        let records = transform(&tied_fixture(), RankMode::Ordinal, NullPolicy::Trail);
        assert_eq!(
            ranks_by_name(&records),
            vec![("a".to_string(), Some(1)), ("b".to_string(), Some(2)), ("c".to_string(), Some(3))]
        );
    }

    #[test]
    fn test_ordinal_tie_break_follows_source_order_not_name() {
        let input = rows(vec![
            json!({"username": "zed", "feed_won_to_spent_ratio": 3.0}),
            json!({"username": "amy", "feed_won_to_spent_ratio": 3.0}),
        ]);
        let records = transform(&input, RankMode::Ordinal, NullPolicy::Trail);
        assert_eq!(records[0].display_name(), "zed");
        assert_eq!(records[1].display_name(), "amy");
    }

    #[test]
    fn test_dense_ranks_have_no_gaps() {
        let ratios = [5.0, 1.0, 5.0, 3.0, 3.0, 3.0, 0.5, 1.0];
        let input: Vec<RawRow> = ratios
            .iter()
            .enumerate()
            .map(|(i, r)| row(json!({"username": format!("u{}", i), "feed_won_to_spent_ratio": r})))
            .collect();
        let records = transform(&input, RankMode::Dense, NullPolicy::Drop);

        // Distinct values descending: 5.0, 3.0, 1.0, 0.5 -> ranks 1..4
        let mut distinct: Vec<f64> = ratios.to_vec();
        distinct.sort_by(|a, b| b.partial_cmp(a).unwrap());
        distinct.dedup();

        for record in &records {
            let ratio = record.feed_won_to_spent_ratio.unwrap();
            let expected = distinct.iter().position(|v| *v == ratio).unwrap() as u32 + 1;
            assert_eq!(record.rank, Some(expected), "ratio {}", ratio);
        }
        let max_rank = records.iter().filter_map(|r| r.rank).max().unwrap();
        assert_eq!(max_rank as usize, distinct.len());
    }

    #[test]
    fn test_ordinal_ranks_are_a_permutation() {
        let ratios = [0.2, 4.0, 4.0, 1.5, 0.2, 9.9];
        let input: Vec<RawRow> =
            ratios.iter().map(|r| row(json!({"feed_won_to_spent_ratio": r.to_string()}))).collect();
        let records = transform(&input, RankMode::Ordinal, NullPolicy::Drop);

        let ranks: Vec<u32> = records.iter().map(|r| r.rank.unwrap()).collect();
        assert_eq!(ranks, (1..=ratios.len() as u32).collect::<Vec<_>>());

        // Ratio never increases as rank increases
        for pair in records.windows(2) {
            assert!(pair[0].feed_won_to_spent_ratio >= pair[1].feed_won_to_spent_ratio);
        }
    }

    #[test]
    fn test_missing_ratio_trails_unranked() {
        let input = rows(vec![
            json!({"username": "blank", "feed_won_to_spent_ratio": ""}),
            json!({"username": "low", "feed_won_to_spent_ratio": "0.5"}),
            json!({"username": "text", "feed_won_to_spent_ratio": "n/a"}),
            json!({"username": "high", "feed_won_to_spent_ratio": "1.5"}),
        ]);
        let records = transform(&input, RankMode::Dense, NullPolicy::Trail);
        assert_eq!(
            ranks_by_name(&records),
            vec![
                ("high".to_string(), Some(1)),
                ("low".to_string(), Some(2)),
                ("blank".to_string(), None),
                ("text".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_missing_ratio_dropped() {
        let input = rows(vec![
            json!({"username": "blank", "feed_won_to_spent_ratio": ""}),
            json!({"username": "low", "feed_won_to_spent_ratio": "0.5"}),
            json!({"username": "absent"}),
        ]);
        let records = transform(&input, RankMode::Ordinal, NullPolicy::Drop);
        assert_eq!(ranks_by_name(&records), vec![("low".to_string(), Some(1))]);
    }

    #[test]
    fn test_no_ratio_column_leaves_everything_unranked() {
        let input = rows(vec![json!({"username": "a"}), json!({"username": "b"})]);
        let trailed = transform(&input, RankMode::Dense, NullPolicy::Trail);
        assert_eq!(trailed.len(), 2);
        assert!(trailed.iter().all(|r| r.rank.is_none()));

        let dropped = transform(&input, RankMode::Dense, NullPolicy::Drop);
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(&json!(2.5))), Some(2.5));
        assert_eq!(coerce_number(Some(&json!(" 3.25 "))), Some(3.25));
        assert_eq!(coerce_number(Some(&json!("1,234.5"))), Some(1234.5));
        assert_eq!(coerce_number(Some(&json!(""))), None);
        assert_eq!(coerce_number(Some(&json!("abc"))), None);
        assert_eq!(coerce_number(Some(&json!("inf"))), None);
        assert_eq!(coerce_number(Some(&json!("NaN"))), None);
        assert_eq!(coerce_number(Some(&json!(true))), None);
        assert_eq!(coerce_number(Some(&Value::Null)), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(Some(&json!("12"))), Some(12));
        assert_eq!(coerce_count(Some(&json!(7.0))), Some(7));
        assert_eq!(coerce_count(Some(&json!("-1"))), None);
        assert_eq!(coerce_count(Some(&json!("2.5"))), None);
        assert_eq!(coerce_count(Some(&json!("many"))), None);
    }

    #[test]
    fn test_coerce_count_rejects_values_past_u64() {
        // u64::MAX as f64 rounds up to 2^64, which does not fit
        assert_eq!(coerce_count(Some(&json!(18446744073709551616.0))), None);
        assert_eq!(coerce_count(Some(&json!("18446744073709551615"))), None);
        assert_eq!(coerce_count(Some(&json!("1e30"))), None);
        assert_eq!(coerce_count(Some(&json!(9007199254740992.0))), Some(9007199254740992));
    }

    #[test]
    fn test_coercion_failure_is_per_field() {
        let input = rows(vec![json!({
            "username": "mixed",
            "feed_won_to_spent_ratio": "1.2",
            "feed_won_total": "oops",
            "spent_total": "10",
            "contests_count_total": "",
            "lineups_count_total": 4
        })]);
        let records = transform(&input, RankMode::Dense, NullPolicy::Drop);
        let record = &records[0];
        assert_eq!(record.feed_won_to_spent_ratio, Some(1.2));
        assert_eq!(record.feed_won_total, None);
        assert_eq!(record.feed_spent_total, Some(10.0));
        assert_eq!(record.contests_count_total, None);
        assert_eq!(record.lineups_count_total, Some(4));
        assert_eq!(record.rank, Some(1));
    }

    #[test]
    fn test_feed_spent_total_preferred_over_alias() {
        let r = row(json!({"feed_spent_total": "5", "spent_total": "9"}));
        assert_eq!(coerce_row(0, &r).feed_spent_total, Some(5.0));
    }

    #[test]
    fn test_derive_username() {
        assert_eq!(derive_username(&json!("alice@example.com")), json!("alice"));
        assert_eq!(derive_username(&json!("alice")), json!("alice"));
        assert_eq!(derive_username(&json!("a@b@c")), json!("a"));
        assert_eq!(derive_username(&json!(42)), json!(42));
        assert_eq!(derive_username(&Value::Null), Value::Null);
    }

    #[test]
    fn test_derive_username_is_idempotent() {
        for input in ["alice@example.com", "bob", "", "@host", "carol@"] {
            let once = derive_username(&json!(input));
            let twice = derive_username(&once);
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn test_username_column_wins_over_email() {
        let r = row(json!({"username": "explicit", "email": "other@example.com"}));
        assert_eq!(username_for(&r).as_deref(), Some("explicit"));
    }

    #[test]
    fn test_username_from_email() {
        let r = row(json!({"email": "dana@example.org"}));
        assert_eq!(username_for(&r).as_deref(), Some("dana"));
    }

    #[test]
    fn test_username_non_string_passes_through() {
        let r = row(json!({"email": 12345}));
        assert_eq!(username_for(&r).as_deref(), Some("12345"));
        let r = row(json!({"email": null}));
        assert_eq!(username_for(&r), None);
        let r = row(json!({"other": "x"}));
        assert_eq!(username_for(&r), None);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let input = rows(vec![
            json!({"username": "neg", "feed_won_to_spent_ratio": -0.0}),
            json!({"username": "pos", "feed_won_to_spent_ratio": 0.0}),
        ]);
        let records = transform(&input, RankMode::Dense, NullPolicy::Drop);
        assert_eq!(records[0].rank, Some(1));
        assert_eq!(records[1].rank, Some(1));
        assert_eq!(records[0].display_name(), "neg");
    }
}
