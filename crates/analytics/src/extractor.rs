use crate::report::HandPlayerMetric;
use core_types::{HandRecord, Participant, PlayerId, PotWinner, ReportQuery};
use rust_decimal::Decimal;

/// Derives per-player monetary fields from a single hand record.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandMetricsExtractor;

impl HandMetricsExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Builds the metric row for `player` in `hand`.
    ///
    /// Every participant entry belonging to the player contributes to the
    /// seat-level fields (rake, posted blinds); descriptive fields come from the
    /// first such entry. A player who is not seated in the hand gets an all-zero
    /// row.
    pub fn extract(&self, hand: &HandRecord, player: PlayerId) -> HandPlayerMetric {
        let seats: Vec<&Participant> = hand.entries_for(player).collect();
        self.build(hand, player, &seats)
    }

    /// Expands a hand into one row per participant entry whose player is on the
    /// query's roster, in seat order.
    ///
    /// A player seated more than once yields one row per seat. Each row carries
    /// the hand-level wager and win sums plus that seat's own rake and blinds;
    /// the `HandAggregator` sums the rows of a `(hand, player)` key.
    pub fn expand(&self, hand: &HandRecord, query: &ReportQuery) -> Vec<HandPlayerMetric> {
        hand.participants
            .iter()
            .filter_map(|seat| {
                let player = seat.player_id.filter(|id| query.includes(*id))?;
                Some(self.build(hand, player, &[seat]))
            })
            .collect()
    }

    fn build(&self, hand: &HandRecord, player: PlayerId, seats: &[&Participant]) -> HandPlayerMetric {
        let first = seats.first();

        let mut metric = HandPlayerMetric {
            hand_id: hand.hand_id.clone(),
            player_id: player,
            name: first.and_then(|p| p.name.clone()),
            network_id: first.and_then(|p| p.network_id.clone()),
            session_id: first.and_then(|p| p.session_id.clone()),
            table_id: hand.table_id.clone(),
            game_type: hand.game_type.clone(),
            format: hand.format,
            game_state: hand.game_state.clone(),
            small_blind: hand.small_blind,
            big_blind: hand.big_blind,
            ante: hand.ante,
            start_time: hand.start_time,
            end_time: hand.end_time,
            posted_small_blind: Decimal::ZERO,
            posted_big_blind: Decimal::ZERO,
            posted_post_big_blind: Decimal::ZERO,
            bet_amount: Decimal::ZERO,
            win_amount: Decimal::ZERO,
            multi_run_win_amount: Decimal::ZERO,
            bonus_pool_win_primary: Decimal::ZERO,
            bonus_pool_win_secondary: Decimal::ZERO,
            rake_amount: Decimal::ZERO,
            total_bet: Decimal::ZERO,
            total_win: Decimal::ZERO,
            total_rake: Decimal::ZERO,
        };

        if seats.is_empty() {
            return metric;
        }

        for seat in seats {
            metric.posted_small_blind += seat.posted_small_blind;
            metric.posted_big_blind += seat.posted_big_blind;
            metric.posted_post_big_blind += seat.posted_post_big_blind;
            metric.rake_amount += seat.rake_contribution;
        }

        metric.bet_amount = hand
            .wager_events
            .iter()
            .filter(|event| event.player_id == Some(player))
            .map(|event| event.signed_amount())
            .sum();
        metric.win_amount = winnings(&hand.pot_winners, player);
        metric.multi_run_win_amount = winnings(&hand.multi_run_winners, player);
        metric.bonus_pool_win_primary = metric.win_amount;
        metric.bonus_pool_win_secondary = first_pot_share(hand, player);

        metric.derive_totals();
        metric
    }
}

fn winnings(winners: &[PotWinner], player: PlayerId) -> Decimal {
    winners
        .iter()
        .filter(|w| w.player_id == Some(player))
        .map(|w| w.amount)
        .sum()
}

/// The player's payout from the first pot, net of an equal slice of the rake
/// adjustment. Only pot index 0 is considered.
fn first_pot_share(hand: &HandRecord, player: PlayerId) -> Decimal {
    let Some(pot) = hand.pot_distributions.first() else {
        return Decimal::ZERO;
    };
    if pot.winners.is_empty() {
        return Decimal::ZERO;
    }

    let slices = Decimal::from(pot.winners.len()) * Decimal::TWO;
    let adjustment = hand.rake_adjustment_total / slices;
    pot.winners
        .iter()
        .filter(|w| w.player_id == Some(player))
        .map(|w| w.amount - adjustment)
        .sum()
}
