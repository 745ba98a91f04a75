use crate::report::{HandPlayerMetric, PlayerPartitionTotal, PlayerTotals};
use core_types::{PlayerId, ReportQuery};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Collapses raw metric rows into one row per `(hand_id, player_id)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandAggregator;

impl HandAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Sorts `rows` by `(hand_id, player_id)` and merges each run of equal keys.
    ///
    /// Numeric fields are summed. Descriptive fields are kept from the first row
    /// of the run; the sort is stable, so that is the first row in input order.
    /// Rows of one key are expected to agree on descriptive fields. A conflict is
    /// logged and the first row's values are kept; under `cfg(test)` it panics.
    pub fn aggregate(&self, mut rows: Vec<HandPlayerMetric>) -> Vec<HandPlayerMetric> {
        rows.sort_by(|a, b| a.key().cmp(&b.key()));

        let mut merged: Vec<HandPlayerMetric> = Vec::with_capacity(rows.len());
        for row in rows {
            match merged.last_mut() {
                Some(current) if current.key() == row.key() => {
                    if current.descriptor() != row.descriptor() {
                        tracing::warn!(
                            hand_id = %row.hand_id,
                            player_id = %row.player_id,
                            "Rows for the same hand and player disagree on descriptive fields; keeping the first."
                        );
                        #[cfg(test)]
                        panic!(
                            "descriptive fields differ for hand {} player {}",
                            row.hand_id, row.player_id
                        );
                    }
                    current.absorb(&row);
                }
                _ => merged.push(row),
            }
        }
        merged
    }
}

/// Sums hand-level rows into one total per player for a single partition.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserPartitionAggregator;

impl UserPartitionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Totals the hands `query` admits, grouped by player and ordered by player id.
    ///
    /// `hands` is expected in `(hand_id, player_id)` order, as produced by the
    /// `HandAggregator`; each player's name and network id come from their first
    /// hand in that order.
    pub fn aggregate(
        &self,
        hands: &[HandPlayerMetric],
        query: &ReportQuery,
    ) -> Vec<PlayerPartitionTotal> {
        let mut totals: BTreeMap<PlayerId, PlayerTotals> = BTreeMap::new();

        for hand in hands.iter().filter(|h| in_scope(h, query)) {
            match totals.entry(hand.player_id) {
                Entry::Vacant(slot) => {
                    slot.insert(PlayerTotals::from_hand(hand));
                }
                Entry::Occupied(mut slot) => slot.get_mut().add_hand(hand),
            }
        }

        totals.into_values().collect()
    }
}

fn in_scope(hand: &HandPlayerMetric, query: &ReportQuery) -> bool {
    query.includes(hand.player_id)
        && hand.game_type == query.game_type
        && hand.end_time.is_some_and(|t| query.window.contains(t))
}
