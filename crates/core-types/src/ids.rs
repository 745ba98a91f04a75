use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player's account id. Stored documents carry it either as a number or as a
/// numeric string; both normalize to the same `PlayerId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl PlayerId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PlayerId {
    fn from(value: i64) -> Self {
        PlayerId(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(PlayerId)
            .map_err(|e| CoreError::InvalidInput("player id".to_string(), format!("'{}': {}", s, e)))
    }
}

/// A hand identifier.
///
/// Numeric ids order numerically and sort ahead of textual ids, so grouping by
/// `(HandId, PlayerId)` has one fixed order whichever way the store typed the id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandId {
    Numeric(i64),
    Text(String),
}

impl HandId {
    /// Builds an id from its textual form, preferring the numeric variant.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => HandId::Numeric(n),
            Err(_) => HandId::Text(trimmed.to_string()),
        }
    }
}

impl Default for HandId {
    fn default() -> Self {
        HandId::Text(String::new())
    }
}

impl From<i64> for HandId {
    fn from(value: i64) -> Self {
        HandId::Numeric(value)
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandId::Numeric(n) => write!(f, "{}", n),
            HandId::Text(s) => write!(f, "{}", s),
        }
    }
}
