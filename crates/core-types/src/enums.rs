use serde::{Deserialize, Serialize};

/// How a hand was settled, as read from the stored `bp` flag.
///
/// Only an explicit `false` selects the standard blinds-plus-wagers formula.
/// Every other hand is settled with the bonus-pool bet and win formulas, but
/// only an explicit bonus-pool flag doubles the rake of a showdown hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameFormat {
    Standard,
    BonusPool,
    /// The flag is missing, null, or carries no recognizable value.
    #[default]
    Unmarked,
}

impl GameFormat {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            GameFormat::BonusPool
        } else {
            GameFormat::Standard
        }
    }

    /// `"BP"` and `"true"` mark a bonus-pool hand, `"false"` a standard one.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("bp") || tag.eq_ignore_ascii_case("true") {
            GameFormat::BonusPool
        } else if tag.eq_ignore_ascii_case("false") {
            GameFormat::Standard
        } else {
            GameFormat::Unmarked
        }
    }

    /// Whether bets count the ante and wins come from the bonus-pool payouts.
    pub fn uses_bonus_pool_formula(&self) -> bool {
        !matches!(self, GameFormat::Standard)
    }

    /// Whether the rake of a showdown hand is counted twice.
    pub fn doubles_showdown_rake(&self) -> bool {
        matches!(self, GameFormat::BonusPool)
    }
}

/// Marks a wager entry as chips handed back because nobody called them.
pub const UNCALLED_ACTION: &str = "uncalledAmt";

/// Game state of a hand that reached showdown.
pub const SHOWDOWN_STATE: &str = "Show";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bp_tag_is_case_insensitive() {
        assert_eq!(GameFormat::from_tag("BP"), GameFormat::BonusPool);
        assert_eq!(GameFormat::from_tag("bp"), GameFormat::BonusPool);
        assert_eq!(GameFormat::from_tag("true"), GameFormat::BonusPool);
        assert_eq!(GameFormat::from_tag("False"), GameFormat::Standard);
        assert_eq!(GameFormat::from_tag("NL"), GameFormat::Unmarked);
        assert_eq!(GameFormat::from_tag(""), GameFormat::Unmarked);
    }

    #[test]
    fn unmarked_hands_use_bonus_pool_formula_without_doubling() {
        assert_eq!(GameFormat::default(), GameFormat::Unmarked);
        assert!(GameFormat::Unmarked.uses_bonus_pool_formula());
        assert!(!GameFormat::Unmarked.doubles_showdown_rake());
        assert!(GameFormat::BonusPool.doubles_showdown_rake());
        assert!(!GameFormat::Standard.uses_bonus_pool_formula());
    }
}
