//! # Report Exporter
//!
//! Presentation of a finished report: the console table with its summary block,
//! and the CSV file. Nothing here computes; it only formats `PlayerTotals` and
//! `ReportTotals` handed in by the caller.

pub mod error;
pub mod export;
pub mod format;
pub mod table;

pub use error::ExportError;
pub use export::{default_csv_path, export_csv, write_csv};
pub use table::{render_report, render_summary, render_table};
