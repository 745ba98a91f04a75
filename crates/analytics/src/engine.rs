use crate::aggregator::{HandAggregator, UserPartitionAggregator};
use crate::extractor::HandMetricsExtractor;
use crate::merger::CrossPartitionMerger;
use crate::ranker::ResultRanker;
use crate::report::{PlayerFinalTotal, PlayerPartitionTotal};
use core_types::{HandRecord, ReportQuery};

/// A stateless calculator that turns raw hands into per-player statistics.
///
/// The engine is split along the partition boundary: `partition_totals` runs
/// once per partition, independently, and `final_totals` runs once over all of
/// their outputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {
    extractor: HandMetricsExtractor,
    hand_aggregator: HandAggregator,
    partition_aggregator: UserPartitionAggregator,
    merger: CrossPartitionMerger,
    ranker: ResultRanker,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs extraction and both aggregation stages over one partition's hands.
    ///
    /// # Arguments
    ///
    /// * `hands` - Every hand record fetched from the partition.
    /// * `query` - The roster, game category and time window of the run.
    pub fn partition_totals(
        &self,
        hands: &[HandRecord],
        query: &ReportQuery,
    ) -> Vec<PlayerPartitionTotal> {
        let rows: Vec<_> = hands
            .iter()
            .flat_map(|hand| self.extractor.expand(hand, query))
            .collect();
        let row_count = rows.len();

        let per_hand = self.hand_aggregator.aggregate(rows);
        let totals = self.partition_aggregator.aggregate(&per_hand, query);

        tracing::debug!(
            hands = hands.len(),
            rows = row_count,
            hand_players = per_hand.len(),
            players = totals.len(),
            "Aggregated partition."
        );
        totals
    }

    /// Merges per-partition totals and ranks the result.
    pub fn final_totals<I>(&self, partitions: I) -> Vec<PlayerFinalTotal>
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = PlayerPartitionTotal>,
    {
        self.ranker.rank(self.merger.merge(partitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{PlayerId, TimeWindow};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn query() -> ReportQuery {
        let window = TimeWindow::from_dates(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
        )
        .unwrap();
        ReportQuery::new("RING", [PlayerId(1), PlayerId(2)], window)
    }

    fn hands(value: serde_json::Value) -> Vec<HandRecord> {
        serde_json::from_value(value).expect("hands decode")
    }

    fn june() -> Vec<HandRecord> {
        hands(json!([
            {
                "gid": 100, "gt": "RING", "bp": false, "gs": "Show",
                "st": "2025-06-02T12:00:00Z", "et": "2025-06-02T12:03:00Z",
                "users": [
                    { "uid": 1, "un": "ace", "sbamt": 10, "ramt": 2 },
                    { "uid": 2, "un": "bob", "bbamt": 20, "ramt": 1 },
                    { "uid": 1, "un": "ace", "ramt": 1 }
                ],
                "gd": [ { "pid": 1, "an": "bet", "amt": 50 }, { "pid": 2, "an": "call", "amt": 40 } ],
                "winners": [ { "uid": 1, "amt": 120 } ]
            },
            {
                "gid": 101, "gt": "RING", "bp": true, "gs": "Show", "ante": 5,
                "st": "2025-06-03T12:00:00Z", "et": "2025-06-03T12:01:00Z",
                "users": [ { "uid": 2, "un": "bob", "ramt": 5 } ]
            },
            {
                "gid": 102, "gt": "SNG",
                "et": "2025-06-04T12:00:00Z",
                "users": [ { "uid": 1, "ramt": 50 } ]
            }
        ]))
    }

    fn july() -> Vec<HandRecord> {
        hands(json!([
            {
                "gid": 200, "gt": "RING", "bp": false,
                "st": "2025-07-09T12:00:00Z", "et": "2025-07-09T12:03:00Z",
                "users": [ { "uid": 1, "un": "ace", "ramt": 4 } ]
            }
        ]))
    }

    #[test]
    fn partition_totals_follow_the_hand_rules() {
        let totals = AnalyticsEngine::new().partition_totals(&june(), &query());

        assert_eq!(totals.len(), 2);
        let ace = &totals[0];
        assert_eq!(ace.player_id, PlayerId(1));
        assert_eq!(ace.hand_count, 1);
        // Two seats in hand 100, each carrying the hand-level wager and win.
        assert_eq!(ace.total_bet, dec!(110));
        assert_eq!(ace.total_win, dec!(240));
        assert_eq!(ace.total_rake, dec!(3));

        let bob = &totals[1];
        assert_eq!(bob.hand_count, 2);
        assert_eq!(bob.total_bet, dec!(65));
        assert_eq!(bob.total_rake, dec!(11));
    }

    #[test]
    fn final_totals_merge_and_rank() {
        let engine = AnalyticsEngine::new();
        let q = query();
        let partitions = vec![
            engine.partition_totals(&june(), &q),
            engine.partition_totals(&july(), &q),
        ];

        let ranked = engine.final_totals(partitions);
        let order: Vec<(PlayerId, _)> = ranked.iter().map(|t| (t.player_id, t.total_rake)).collect();
        assert_eq!(order, vec![(PlayerId(2), dec!(11)), (PlayerId(1), dec!(7))]);
        assert_eq!(ranked[1].hand_count, 2);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let engine = AnalyticsEngine::new();
        let q = query();
        let run = || {
            engine.final_totals(vec![
                engine.partition_totals(&july(), &q),
                engine.partition_totals(&june(), &q),
            ])
        };
        assert_eq!(run(), run());
    }
}
