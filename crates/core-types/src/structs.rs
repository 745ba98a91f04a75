use crate::decode;
use crate::enums::{GameFormat, SHOWDOWN_STATE, UNCALLED_ACTION};
use crate::ids::{HandId, PlayerId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One seat occupied by a player during a hand.
///
/// A player who re-seats or rebuys mid-hand shows up in more than one entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Participant {
    #[serde(rename = "uid", default, deserialize_with = "decode::player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(rename = "un", default, deserialize_with = "decode::text")]
    pub name: Option<String>,
    #[serde(rename = "nid", default, deserialize_with = "decode::text")]
    pub network_id: Option<String>,
    #[serde(rename = "id", default, deserialize_with = "decode::text")]
    pub session_id: Option<String>,
    #[serde(rename = "sbamt", default, deserialize_with = "decode::amount")]
    pub posted_small_blind: Decimal,
    #[serde(rename = "bbamt", default, deserialize_with = "decode::amount")]
    pub posted_big_blind: Decimal,
    #[serde(rename = "pbbamt", default, deserialize_with = "decode::amount")]
    pub posted_post_big_blind: Decimal,
    #[serde(rename = "pl", default, deserialize_with = "decode::amount")]
    pub profit_loss: Decimal,
    #[serde(rename = "ramt", default, deserialize_with = "decode::amount")]
    pub rake_contribution: Decimal,
}

/// A chip movement recorded in the hand's action log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WagerEvent {
    #[serde(rename = "pid", default, deserialize_with = "decode::player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(rename = "an", default, deserialize_with = "decode::text_or_empty")]
    pub action: String,
    #[serde(rename = "amt", default, deserialize_with = "decode::amount")]
    pub amount: Decimal,
}

impl WagerEvent {
    /// The amount as it counts toward the player's wager: returned chips are negative.
    pub fn signed_amount(&self) -> Decimal {
        if self.action == UNCALLED_ACTION {
            -self.amount
        } else {
            self.amount
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PotWinner {
    #[serde(rename = "uid", default, deserialize_with = "decode::player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(rename = "amt", default, deserialize_with = "decode::amount")]
    pub amount: Decimal,
}

/// One pot and the players it was paid out to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PotDistribution {
    #[serde(rename = "winnerlist", default, deserialize_with = "decode::list")]
    pub winners: Vec<PotWinner>,
}

/// One played hand, as stored in a monthly partition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HandRecord {
    #[serde(rename = "gid", default, deserialize_with = "decode::hand_id")]
    pub hand_id: HandId,
    #[serde(rename = "gt", default, deserialize_with = "decode::text_or_empty")]
    pub game_type: String,
    #[serde(rename = "bp", default, deserialize_with = "decode::game_format")]
    pub format: GameFormat,
    #[serde(rename = "gs", default, deserialize_with = "decode::text_or_empty")]
    pub game_state: String,
    #[serde(rename = "st", default, deserialize_with = "decode::timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "et", default, deserialize_with = "decode::timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "tid", default, deserialize_with = "decode::text")]
    pub table_id: Option<String>,
    #[serde(rename = "cid", default, deserialize_with = "decode::text")]
    pub config_id: Option<String>,
    #[serde(rename = "gv", default, deserialize_with = "decode::text")]
    pub game_variant: Option<String>,
    #[serde(rename = "cn", default, deserialize_with = "decode::text")]
    pub game_name: Option<String>,
    #[serde(rename = "sb", default, deserialize_with = "decode::amount")]
    pub small_blind: Decimal,
    #[serde(rename = "bb", default, deserialize_with = "decode::amount")]
    pub big_blind: Decimal,
    #[serde(default, deserialize_with = "decode::amount")]
    pub ante: Decimal,
    /// Rake adjustment shared across the first pot's winners (`gramt`).
    #[serde(rename = "gramt", default, deserialize_with = "decode::amount")]
    pub rake_adjustment_total: Decimal,
    #[serde(rename = "users", default, deserialize_with = "decode::list")]
    pub participants: Vec<Participant>,
    #[serde(rename = "gd", default, deserialize_with = "decode::list")]
    pub wager_events: Vec<WagerEvent>,
    #[serde(rename = "winners", default, deserialize_with = "decode::list")]
    pub pot_winners: Vec<PotWinner>,
    #[serde(rename = "mrwinners", default, deserialize_with = "decode::list")]
    pub multi_run_winners: Vec<PotWinner>,
    #[serde(rename = "potwinamtplayerlist", default, deserialize_with = "decode::list")]
    pub pot_distributions: Vec<PotDistribution>,
}

impl HandRecord {
    pub fn is_showdown(&self) -> bool {
        self.game_state == SHOWDOWN_STATE
    }

    /// Participant entries belonging to `player`, in seat order.
    pub fn entries_for(&self, player: PlayerId) -> impl Iterator<Item = &Participant> {
        self.participants
            .iter()
            .filter(move |p| p.player_id == Some(player))
    }

    /// Distinct players seated in the hand, in order of first appearance.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut seen = Vec::new();
        for id in self.participants.iter().filter_map(|p| p.player_id) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }
}
