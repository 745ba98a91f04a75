//! # Hand Statistics Analytics
//!
//! This crate turns raw hand records into per-player bet, win and rake totals.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the
//!   document store or of how partitions are fetched. It depends only on
//!   `core-types` (Layer 0).
//! - **Stateless Calculation:** Every stage is a stateless value. Each takes
//!   records in and hands fresh records out, so a partition's path can run on any
//!   thread and the same input always yields the same report.
//!
//! ## Pipeline
//!
//! `HandMetricsExtractor` → `HandAggregator` → `UserPartitionAggregator` run once
//! per partition; `CrossPartitionMerger` → `ResultRanker` run once over all
//! partitions. `AnalyticsEngine` wires the stages together.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod engine;
pub mod extractor;
pub mod merger;
pub mod ranker;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::{HandAggregator, UserPartitionAggregator};
pub use engine::AnalyticsEngine;
pub use extractor::HandMetricsExtractor;
pub use merger::CrossPartitionMerger;
pub use ranker::ResultRanker;
pub use report::{HandPlayerMetric, PlayerFinalTotal, PlayerPartitionTotal, PlayerTotals, ReportTotals};
