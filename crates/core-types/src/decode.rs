//! Lenient field decoders for stored hand documents.
//!
//! Documents come from a schemaless store: amounts may be integers, doubles or
//! decimal strings, ids may be numbers or strings, and any field may be missing or
//! null. Each decoder here maps whatever it finds onto an explicit default instead
//! of failing, so one malformed field never aborts a report run.

use crate::enums::GameFormat;
use crate::ids::{HandId, PlayerId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny};
use std::str::FromStr;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Seq<T> {
    Items(Vec<T>),
    Other(IgnoredAny),
}

fn scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer)
}

/// Monetary amount; anything unreadable counts as zero.
pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match scalar(deserializer)? {
        Some(Scalar::Int(n)) => Decimal::from(n),
        Some(Scalar::Float(f)) => Decimal::from_f64(f).unwrap_or_default(),
        Some(Scalar::Text(s)) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .unwrap_or_default()
        }
        _ => Decimal::ZERO,
    };
    Ok(value)
}

/// Optional text. Numbers are rendered as text; empty strings count as absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match scalar(deserializer)? {
        Some(Scalar::Text(s)) if !s.is_empty() => Some(s),
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(f)) => Some(f.to_string()),
        _ => None,
    };
    Ok(value)
}

/// Required text with an empty default.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

pub fn player_id<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match scalar(deserializer)? {
        Some(Scalar::Int(n)) => Some(PlayerId(n)),
        Some(Scalar::Float(f)) if f.fract() == 0.0 => Some(PlayerId(f as i64)),
        Some(Scalar::Text(s)) => s.parse::<PlayerId>().ok(),
        _ => None,
    };
    Ok(value)
}

pub fn hand_id<'de, D>(deserializer: D) -> Result<HandId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match scalar(deserializer)? {
        Some(Scalar::Int(n)) => HandId::Numeric(n),
        Some(Scalar::Float(f)) if f.fract() == 0.0 => HandId::Numeric(f as i64),
        Some(Scalar::Text(s)) => HandId::parse(&s),
        _ => HandId::default(),
    };
    Ok(value)
}

/// Timestamp given as RFC 3339 text or as epoch milliseconds.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match scalar(deserializer)? {
        Some(Scalar::Text(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Scalar::Int(millis)) => DateTime::<Utc>::from_timestamp_millis(millis),
        _ => None,
    };
    Ok(value)
}

/// The `bp` flag: a boolean or a `"BP"` tag. Anything else is `Unmarked`.
pub fn game_format<'de, D>(deserializer: D) -> Result<GameFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match scalar(deserializer)? {
        Some(Scalar::Bool(flag)) => GameFormat::from_flag(flag),
        Some(Scalar::Text(s)) => GameFormat::from_tag(&s),
        _ => GameFormat::default(),
    };
    Ok(value)
}

/// A sequence; a missing, null, or non-array value is an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = match Option::<Seq<T>>::deserialize(deserializer)? {
        Some(Seq::Items(items)) => items,
        _ => Vec::new(),
    };
    Ok(value)
}
