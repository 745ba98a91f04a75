use chrono::{DateTime, Utc};
use core_types::{GameFormat, HandId, PlayerId};
use rust_decimal::Decimal;

/// One player's money movement in one hand.
///
/// Produced by the `HandMetricsExtractor` and collapsed to one record per
/// `(hand_id, player_id)` by the `HandAggregator`.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPlayerMetric {
    pub hand_id: HandId,
    pub player_id: PlayerId,

    // I. Descriptive fields, expected to agree across rows of the same key
    pub name: Option<String>,
    pub network_id: Option<String>,
    pub session_id: Option<String>,
    pub table_id: Option<String>,
    pub game_type: String,
    pub format: GameFormat,
    pub game_state: String,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub ante: Decimal,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    // II. Posted blinds, summed over the player's seats
    pub posted_small_blind: Decimal,
    pub posted_big_blind: Decimal,
    pub posted_post_big_blind: Decimal,

    // III. Raw per-player amounts
    pub bet_amount: Decimal,
    pub win_amount: Decimal,
    pub multi_run_win_amount: Decimal,
    pub bonus_pool_win_primary: Decimal,
    pub bonus_pool_win_secondary: Decimal,
    pub rake_amount: Decimal,

    // IV. Format-dependent totals
    pub total_bet: Decimal,
    pub total_win: Decimal,
    pub total_rake: Decimal,
}

/// The fields that identify rather than measure a hand-player row.
#[derive(Debug, PartialEq)]
pub(crate) struct Descriptor<'a> {
    name: Option<&'a str>,
    network_id: Option<&'a str>,
    session_id: Option<&'a str>,
    table_id: Option<&'a str>,
    game_type: &'a str,
    format: GameFormat,
    game_state: &'a str,
    blinds: (Decimal, Decimal, Decimal),
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl HandPlayerMetric {
    pub fn key(&self) -> (&HandId, PlayerId) {
        (&self.hand_id, self.player_id)
    }

    pub(crate) fn descriptor(&self) -> Descriptor<'_> {
        Descriptor {
            name: self.name.as_deref(),
            network_id: self.network_id.as_deref(),
            session_id: self.session_id.as_deref(),
            table_id: self.table_id.as_deref(),
            game_type: &self.game_type,
            format: self.format,
            game_state: &self.game_state,
            blinds: (self.small_blind, self.big_blind, self.ante),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Fills in `total_bet`, `total_win` and `total_rake` from the raw amounts.
    ///
    /// Standard hands count posted blinds plus wagers, and main plus multi-run pot
    /// wins. Every other hand counts the ante plus wagers, and both bonus-pool
    /// wins. Rake is doubled only for flagged bonus-pool hands that went to
    /// showdown.
    pub(crate) fn derive_totals(&mut self) {
        if self.format.uses_bonus_pool_formula() {
            self.total_bet = self.ante + self.bet_amount;
            self.total_win = self.bonus_pool_win_primary + self.bonus_pool_win_secondary;
        } else {
            self.total_bet = self.posted_small_blind
                + self.posted_big_blind
                + self.posted_post_big_blind
                + self.bet_amount;
            self.total_win = self.multi_run_win_amount + self.win_amount;
        }
        self.total_rake =
            if self.format.doubles_showdown_rake() && self.game_state == core_types::SHOWDOWN_STATE {
                self.rake_amount * Decimal::TWO
            } else {
                self.rake_amount
            };
    }

    /// Adds every numeric field of `other` into `self`. Descriptive fields are left as-is.
    pub(crate) fn absorb(&mut self, other: &HandPlayerMetric) {
        self.posted_small_blind += other.posted_small_blind;
        self.posted_big_blind += other.posted_big_blind;
        self.posted_post_big_blind += other.posted_post_big_blind;
        self.bet_amount += other.bet_amount;
        self.win_amount += other.win_amount;
        self.multi_run_win_amount += other.multi_run_win_amount;
        self.bonus_pool_win_primary += other.bonus_pool_win_primary;
        self.bonus_pool_win_secondary += other.bonus_pool_win_secondary;
        self.rake_amount += other.rake_amount;
        self.total_bet += other.total_bet;
        self.total_win += other.total_win;
        self.total_rake += other.total_rake;
    }
}

/// A player's totals over some set of hands.
///
/// The same shape serves per-partition totals and the final, merged totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTotals {
    pub player_id: PlayerId,
    pub name: Option<String>,
    pub network_id: Option<String>,
    pub total_bet: Decimal,
    pub total_win: Decimal,
    pub total_rake: Decimal,
    pub hand_count: u64,
    pub earliest_start: Option<DateTime<Utc>>,
    pub latest_end: Option<DateTime<Utc>>,
}

/// Totals for one player within one partition.
pub type PlayerPartitionTotal = PlayerTotals;

/// Totals for one player across every partition of the report.
pub type PlayerFinalTotal = PlayerTotals;

impl PlayerTotals {
    /// Opens a total from the first hand seen for a player.
    pub fn from_hand(hand: &HandPlayerMetric) -> Self {
        Self {
            player_id: hand.player_id,
            name: hand.name.clone(),
            network_id: hand.network_id.clone(),
            total_bet: hand.total_bet,
            total_win: hand.total_win,
            total_rake: hand.total_rake,
            hand_count: 1,
            earliest_start: hand.start_time,
            latest_end: hand.end_time,
        }
    }

    pub(crate) fn add_hand(&mut self, hand: &HandPlayerMetric) {
        self.total_bet += hand.total_bet;
        self.total_win += hand.total_win;
        self.total_rake += hand.total_rake;
        self.hand_count += 1;
        self.earliest_start = earliest(self.earliest_start, hand.start_time);
        self.latest_end = latest(self.latest_end, hand.end_time);
    }

    /// Combines two totals for the same player.
    ///
    /// Commutative and associative in every field: numbers add, bounds take
    /// min/max, and the name/network pair comes from whichever side ranks first by
    /// (earliest start, name, network id), present values ahead of absent ones.
    pub fn combine(&self, other: &PlayerTotals) -> PlayerTotals {
        let identity = if other.identity_rank() < self.identity_rank() {
            other
        } else {
            self
        };
        PlayerTotals {
            player_id: self.player_id,
            name: identity.name.clone(),
            network_id: identity.network_id.clone(),
            total_bet: self.total_bet + other.total_bet,
            total_win: self.total_win + other.total_win,
            total_rake: self.total_rake + other.total_rake,
            hand_count: self.hand_count + other.hand_count,
            earliest_start: earliest(self.earliest_start, other.earliest_start),
            latest_end: latest(self.latest_end, other.latest_end),
        }
    }

    /// Net result from the player's side.
    pub fn net(&self) -> Decimal {
        self.total_win - self.total_bet
    }

    #[allow(clippy::type_complexity)]
    fn identity_rank(
        &self,
    ) -> (
        bool,
        Option<DateTime<Utc>>,
        bool,
        Option<&str>,
        bool,
        Option<&str>,
    ) {
        (
            self.earliest_start.is_none(),
            self.earliest_start,
            self.name.is_none(),
            self.name.as_deref(),
            self.network_id.is_none(),
            self.network_id.as_deref(),
        )
    }
}

/// Aggregate figures over all rows of a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTotals {
    pub users: usize,
    pub total_bet: Decimal,
    pub total_win: Decimal,
    pub total_rake: Decimal,
    pub total_hands: u64,
}

impl ReportTotals {
    pub fn from_players(players: &[PlayerTotals]) -> Self {
        players.iter().fold(
            ReportTotals {
                users: players.len(),
                ..ReportTotals::default()
            },
            |mut acc, p| {
                acc.total_bet += p.total_bet;
                acc.total_win += p.total_win;
                acc.total_rake += p.total_rake;
                acc.total_hands += p.hand_count;
                acc
            },
        )
    }

    /// Total won minus total bet.
    pub fn net(&self) -> Decimal {
        self.total_win - self.total_bet
    }
}

fn earliest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn latest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}
