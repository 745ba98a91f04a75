use crate::error::DbError;
use crate::partition::Partition;
use async_trait::async_trait;
use core_types::{HandRecord, ReportQuery};

/// Reads hand records out of one monthly partition.
///
/// The report pipeline is agnostic about whether it talks to the live document
/// store or to records held in memory; both implement this trait.
#[async_trait]
pub trait HandSource: Send + Sync {
    /// The store-side name of `partition` (e.g. `game_202506`).
    fn partition_name(&self, partition: &Partition) -> String;

    /// Returns every hand in `partition` that `query` admits. A partition with no
    /// stored data yields an empty list; any store failure is an error.
    async fn fetch_hands(
        &self,
        partition: &Partition,
        query: &ReportQuery,
    ) -> Result<Vec<HandRecord>, DbError>;
}
