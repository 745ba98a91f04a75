use crate::error::CoreError;
use crate::ids::PlayerId;
use crate::structs::HandRecord;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeSet;

/// A half-open `[start, end)` interval, matched against a hand's end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Covers whole calendar days: from midnight UTC on `from` up to, but not
    /// including, midnight after `to`.
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        let after_to = to.succ_opt().ok_or_else(|| {
            CoreError::InvalidInput("end date".to_string(), format!("{} has no following day", to))
        })?;
        Ok(Self {
            start: from.and_time(NaiveTime::MIN).and_utc(),
            end: after_to.and_time(NaiveTime::MIN).and_utc(),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Which hands a report run looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    /// Only hands of this game category are counted (e.g. "RING").
    pub game_type: String,
    pub player_ids: BTreeSet<PlayerId>,
    pub window: TimeWindow,
}

impl ReportQuery {
    pub fn new(
        game_type: impl Into<String>,
        player_ids: impl IntoIterator<Item = PlayerId>,
        window: TimeWindow,
    ) -> Self {
        Self {
            game_type: game_type.into(),
            player_ids: player_ids.into_iter().collect(),
            window,
        }
    }

    pub fn includes(&self, player: PlayerId) -> bool {
        self.player_ids.contains(&player)
    }

    /// Whether the hand is in scope: right category, ended inside the window, and
    /// at least one filtered player seated.
    pub fn admits(&self, hand: &HandRecord) -> bool {
        hand.game_type == self.game_type
            && hand.end_time.is_some_and(|t| self.window.contains(t))
            && hand
                .participants
                .iter()
                .filter_map(|p| p.player_id)
                .any(|id| self.includes(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::Participant;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_includes_whole_end_day() {
        let window = TimeWindow::from_dates(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        assert!(window.contains(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2025, 5, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn admits_checks_category_window_and_roster() {
        let window = TimeWindow::from_dates(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let query = ReportQuery::new("RING", [PlayerId(1)], window);
        let hand = HandRecord {
            game_type: "RING".to_string(),
            end_time: Some(Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()),
            participants: vec![Participant {
                player_id: Some(PlayerId(1)),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(query.admits(&hand));

        let tournament = HandRecord { game_type: "MTT".to_string(), ..hand.clone() };
        assert!(!query.admits(&tournament));

        let undated = HandRecord { end_time: None, ..hand.clone() };
        assert!(!query.admits(&undated));

        let stranger = HandRecord {
            participants: vec![Participant { player_id: Some(PlayerId(2)), ..Default::default() }],
            ..hand
        };
        assert!(!query.admits(&stranger));
    }
}
