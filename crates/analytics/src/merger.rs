use crate::report::{PlayerFinalTotal, PlayerPartitionTotal};
use core_types::PlayerId;
use std::collections::BTreeMap;

/// Folds the per-partition totals of a run into one total per player.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossPartitionMerger;

impl CrossPartitionMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merges every partition's totals, keyed by player.
    ///
    /// The result does not depend on the order of `partitions` or of the totals
    /// inside them; see `PlayerTotals::combine`. Output is ordered by player id.
    pub fn merge<I>(&self, partitions: I) -> Vec<PlayerFinalTotal>
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = PlayerPartitionTotal>,
    {
        let mut merged: BTreeMap<PlayerId, PlayerFinalTotal> = BTreeMap::new();
        for total in partitions.into_iter().flatten() {
            let combined = match merged.get(&total.player_id) {
                Some(existing) => existing.combine(&total),
                None => total,
            };
            merged.insert(combined.player_id, combined);
        }
        merged.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PlayerTotals;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn total(player: i64, name: &str, rake: Decimal, hands: u64, day: u32) -> PlayerTotals {
        PlayerTotals {
            player_id: PlayerId(player),
            name: Some(name.to_string()),
            network_id: Some("net".to_string()),
            total_bet: rake * dec!(10),
            total_win: rake * dec!(7),
            total_rake: rake,
            hand_count: hands,
            earliest_start: Some(Utc.with_ymd_and_hms(2025, 6, day, 8, 0, 0).unwrap()),
            latest_end: Some(Utc.with_ymd_and_hms(2025, 6, day, 23, 0, 0).unwrap()),
        }
    }

    fn june() -> Vec<PlayerTotals> {
        vec![total(1, "ace", dec!(3), 4, 10), total(2, "bob", dec!(1), 1, 12)]
    }

    fn july() -> Vec<PlayerTotals> {
        vec![total(1, "ace-renamed", dec!(2.5), 2, 1)]
    }

    fn august() -> Vec<PlayerTotals> {
        vec![total(2, "bob", dec!(4), 3, 20), total(3, "cat", dec!(9), 9, 21)]
    }

    #[test]
    fn totals_are_summed_across_partitions() {
        let merged = CrossPartitionMerger::new().merge(vec![june(), july()]);

        assert_eq!(merged.len(), 2);
        let ace = &merged[0];
        assert_eq!(ace.player_id, PlayerId(1));
        assert_eq!(ace.total_rake, dec!(5.5));
        assert_eq!(ace.total_bet, dec!(55));
        assert_eq!(ace.hand_count, 6);
        assert_eq!(
            ace.earliest_start,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(
            ace.latest_end,
            Some(Utc.with_ymd_and_hms(2025, 6, 10, 23, 0, 0).unwrap())
        );
        // The contribution that started earliest names the player.
        assert_eq!(ace.name.as_deref(), Some("ace-renamed"));
    }

    #[test]
    fn merge_is_commutative() {
        let merger = CrossPartitionMerger::new();
        let forward = merger.merge(vec![june(), july(), august()]);
        let backward = merger.merge(vec![august(), july(), june()]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn merge_is_associative() {
        let merger = CrossPartitionMerger::new();
        let flat = merger.merge(vec![june(), july(), august()]);
        let left = merger.merge(vec![merger.merge(vec![june(), july()]), august()]);
        let right = merger.merge(vec![june(), merger.merge(vec![july(), august()])]);
        assert_eq!(flat, left);
        assert_eq!(flat, right);
    }

    #[test]
    fn no_partitions_means_no_players() {
        let merged = CrossPartitionMerger::new().merge(Vec::<Vec<PlayerTotals>>::new());
        assert!(merged.is_empty());
    }
}
