use crate::error::DbError;
use crate::partition::Partition;
use crate::source::HandSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use configuration::DatabaseSettings;
use core_types::{HandRecord, ReportQuery};
use futures::stream::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::FindOptions;
use std::time::Duration;

/// The `DbRepository` reads hand history out of the monthly collections.
/// It encapsulates the query shape and the document normalization.
#[derive(Debug, Clone)]
pub struct DbRepository {
    database: Database,
    partition_prefix: String,
    query_timeout: Duration,
}

impl DbRepository {
    pub fn new(database: Database, settings: &DatabaseSettings) -> Self {
        Self {
            database,
            partition_prefix: settings.partition_prefix.clone(),
            query_timeout: Duration::from_secs(settings.query_timeout_secs),
        }
    }
}

#[async_trait]
impl HandSource for DbRepository {
    fn partition_name(&self, partition: &Partition) -> String {
        partition.collection_name(&self.partition_prefix)
    }

    async fn fetch_hands(
        &self,
        partition: &Partition,
        query: &ReportQuery,
    ) -> Result<Vec<HandRecord>, DbError> {
        let name = self.partition_name(partition);
        let collection = self.database.collection::<Document>(&name);
        let options = FindOptions::builder().max_time(self.query_timeout).build();

        let query_error = |source| DbError::QueryError {
            partition: name.clone(),
            source,
        };
        let mut cursor = collection
            .find(hand_filter(query), options)
            .await
            .map_err(query_error)?;

        let mut hands = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(query_error)? {
            let hand = decode_hand(document).map_err(|source| DbError::DecodeError {
                partition: name.clone(),
                source,
            })?;
            hands.push(hand);
        }

        tracing::debug!(partition = %name, hands = hands.len(), "Fetched partition.");
        Ok(hands)
    }
}

/// Server-side filter: game category, any seated player from the roster, and the
/// hand's end time inside the half-open window.
pub fn hand_filter(query: &ReportQuery) -> Document {
    let player_ids: Vec<i64> = query.player_ids.iter().map(|id| id.value()).collect();
    doc! {
        "gt": query.game_type.as_str(),
        "users.uid": { "$in": player_ids },
        "et": {
            "$gte": bson::DateTime::from_millis(query.window.start.timestamp_millis()),
            "$lt": bson::DateTime::from_millis(query.window.end.timestamp_millis()),
        },
    }
}

/// Decodes a stored document into a `HandRecord`.
pub fn decode_hand(document: Document) -> Result<HandRecord, bson::de::Error> {
    bson::from_bson(normalize(Bson::Document(document)))
}

/// Rewrites store-specific scalar types into the plain forms the lenient field
/// decoders understand: Decimal128 becomes decimal text, dates become RFC 3339 text.
fn normalize(value: Bson) -> Bson {
    match value {
        Bson::Decimal128(d) => Bson::String(d.to_string()),
        Bson::DateTime(dt) => match DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()) {
            Some(instant) => Bson::String(instant.to_rfc3339()),
            None => Bson::Null,
        },
        Bson::Document(document) => Bson::Document(
            document
                .into_iter()
                .map(|(key, value)| (key, normalize(value)))
                .collect(),
        ),
        Bson::Array(items) => Bson::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use core_types::{GameFormat, HandId, PlayerId, TimeWindow};
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_native_bson_types() {
        let ended = Utc.with_ymd_and_hms(2025, 6, 3, 21, 15, 0).unwrap();
        let document = doc! {
            "_id": bson::oid::ObjectId::new(),
            "gid": 1200_i32,
            "gt": "RING",
            "bp": true,
            "et": bson::DateTime::from_millis(ended.timestamp_millis()),
            "users": [ { "uid": 4815318_i64, "un": "ace", "ramt": 1.5, "sbamt": bson::Bson::Null } ],
            "gd": [ { "pid": 4815318_i32, "an": "uncalledAmt", "amt": 15_i32 } ],
        };

        let hand = decode_hand(document).unwrap();
        assert_eq!(hand.hand_id, HandId::Numeric(1200));
        assert_eq!(hand.format, GameFormat::BonusPool);
        assert_eq!(hand.end_time, Some(ended));
        assert_eq!(hand.participants[0].player_id, Some(PlayerId(4815318)));
        assert_eq!(hand.participants[0].rake_contribution, dec!(1.5));
        assert_eq!(hand.participants[0].posted_small_blind, dec!(0));
        assert_eq!(hand.wager_events[0].signed_amount(), dec!(-15));
    }

    #[test]
    fn filter_targets_category_roster_and_window() {
        let window = TimeWindow::from_dates(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap();
        let query = ReportQuery::new("RING", [PlayerId(5), PlayerId(3)], window);

        let filter = hand_filter(&query);
        assert_eq!(filter.get_str("gt").unwrap(), "RING");
        let ids = filter
            .get_document("users.uid")
            .unwrap()
            .get_array("$in")
            .unwrap();
        assert_eq!(ids, &vec![Bson::Int64(3), Bson::Int64(5)]);
        let et = filter.get_document("et").unwrap();
        assert_eq!(
            et.get_datetime("$lt").unwrap().timestamp_millis(),
            window.end.timestamp_millis()
        );
    }
}
