use crate::error::AnalyzerError;
use analytics::{AnalyticsEngine, PlayerFinalTotal, PlayerPartitionTotal, ReportTotals};
use core_types::ReportQuery;
use database::{HandSource, Partition};
use futures::future::join_all;
use indicatif::ProgressBar;
use std::sync::Arc;

pub mod error;

/// The outcome of one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// Store-side names of the partitions that were read, oldest first.
    pub partitions: Vec<String>,
    /// Final per-player totals in ranked order.
    pub players: Vec<PlayerFinalTotal>,
    pub totals: ReportTotals,
}

impl StatsReport {
    fn empty(partitions: Vec<String>) -> Self {
        Self {
            partitions,
            players: Vec::new(),
            totals: ReportTotals::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Runs the report pipeline: one task per monthly partition, then a single
/// merge and rank over all of them.
pub struct Analyzer {
    source: Arc<dyn HandSource>,
    engine: AnalyticsEngine,
    progress: ProgressBar,
}

impl Analyzer {
    pub fn new(source: Arc<dyn HandSource>) -> Self {
        Self {
            source,
            engine: AnalyticsEngine::new(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Replaces the hidden default progress bar. Its length is set per run.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Fetches, aggregates, merges and ranks every partition the query's window touches.
    ///
    /// Either every partition succeeds or the run fails; no partial report is
    /// produced.
    pub async fn run(&self, query: &ReportQuery) -> Result<StatsReport, AnalyzerError> {
        if query.player_ids.is_empty() {
            tracing::warn!("No player ids to report on; returning an empty report.");
            return Ok(StatsReport::empty(Vec::new()));
        }

        // 1. Plan
        let partitions = Partition::for_window(&query.window);
        let names: Vec<String> = partitions
            .iter()
            .map(|p| self.source.partition_name(p))
            .collect();
        if partitions.is_empty() {
            tracing::info!("Date range covers no partitions.");
            return Ok(StatsReport::empty(names));
        }
        tracing::info!(
            partitions = %names.join(","),
            players = query.player_ids.len(),
            "Starting report run."
        );

        // 2. Fan out
        self.progress.set_length(partitions.len() as u64);
        let query = Arc::new(query.clone());
        let tasks: Vec<_> = partitions
            .into_iter()
            .map(|partition| {
                let source = Arc::clone(&self.source);
                let query = Arc::clone(&query);
                let engine = self.engine;
                let progress = self.progress.clone();

                tokio::spawn(async move {
                    progress.set_message(format!("Reading {}...", partition));
                    let hands = source.fetch_hands(&partition, &query).await?;
                    let totals = engine.partition_totals(&hands, &query);
                    progress.inc(1);
                    Ok::<Vec<PlayerPartitionTotal>, database::DbError>(totals)
                })
            })
            .collect();

        // 3. Fan in
        let results = join_all(tasks).await;
        self.progress.finish_and_clear();

        let mut per_partition = Vec::with_capacity(results.len());
        for (name, result) in names.iter().zip(results) {
            let totals = result.map_err(|source| AnalyzerError::TaskFailed {
                partition: name.clone(),
                source,
            })??;
            tracing::debug!(partition = %name, players = totals.len(), "Partition complete.");
            per_partition.push(totals);
        }

        // 4. Merge and rank
        let players = self.engine.final_totals(per_partition);
        let totals = ReportTotals::from_players(&players);
        tracing::info!(
            players = totals.users,
            hands = totals.total_hands,
            "Report run complete."
        );

        Ok(StatsReport {
            partitions: names,
            players,
            totals,
        })
    }
}
