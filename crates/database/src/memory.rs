use crate::error::DbError;
use crate::partition::Partition;
use crate::source::HandSource;
use async_trait::async_trait;
use core_types::{HandRecord, ReportQuery};
use std::collections::{HashMap, HashSet};

/// Hand records held in memory, keyed by partition.
///
/// Applies the same admission rules as the store query, and can be told to fail
/// specific partitions to exercise the all-or-nothing run semantics.
#[derive(Debug, Clone, Default)]
pub struct MemoryHandSource {
    partitions: HashMap<Partition, Vec<HandRecord>>,
    failing: HashSet<Partition>,
    prefix: String,
}

impl MemoryHandSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Appends `hands` to `partition`.
    pub fn with_hands(mut self, partition: Partition, hands: Vec<HandRecord>) -> Self {
        self.partitions.entry(partition).or_default().extend(hands);
        self
    }

    pub fn failing(mut self, partition: Partition) -> Self {
        self.failing.insert(partition);
        self
    }
}

#[async_trait]
impl HandSource for MemoryHandSource {
    fn partition_name(&self, partition: &Partition) -> String {
        partition.collection_name(&self.prefix)
    }

    async fn fetch_hands(
        &self,
        partition: &Partition,
        query: &ReportQuery,
    ) -> Result<Vec<HandRecord>, DbError> {
        if self.failing.contains(partition) {
            return Err(DbError::PartitionUnavailable(self.partition_name(partition)));
        }
        let hands = self
            .partitions
            .get(partition)
            .map(|hands| hands.iter().filter(|h| query.admits(h)).cloned().collect())
            .unwrap_or_default();
        Ok(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{PlayerId, TimeWindow};
    use serde_json::json;

    fn june_query() -> ReportQuery {
        let window = TimeWindow::from_dates(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap();
        ReportQuery::new("RING", [PlayerId(1)], window)
    }

    fn hand(gt: &str, uid: i64, ended: &str) -> HandRecord {
        serde_json::from_value(json!({ "gt": gt, "et": ended, "users": [ { "uid": uid } ] })).unwrap()
    }

    #[tokio::test]
    async fn applies_the_query_predicate() {
        let june = Partition::new(2025, 6).unwrap();
        let source = MemoryHandSource::new("game_").with_hands(
            june,
            vec![
                hand("RING", 1, "2025-06-10T00:00:00Z"),
                hand("SNG", 1, "2025-06-10T00:00:00Z"),
                hand("RING", 2, "2025-06-10T00:00:00Z"),
                hand("RING", 1, "2025-07-01T00:00:00Z"),
            ],
        );

        let hands = source.fetch_hands(&june, &june_query()).await.unwrap();
        assert_eq!(hands.len(), 1);

        let empty = Partition::new(2025, 5).unwrap();
        assert!(source.fetch_hands(&empty, &june_query()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failing_partitions_report_their_name() {
        let june = Partition::new(2025, 6).unwrap();
        let source = MemoryHandSource::new("game_").failing(june);
        let err = source.fetch_hands(&june, &june_query()).await.unwrap_err();
        assert_eq!(err.to_string(), "Partition 'game_202506' is unavailable.");
    }
}
