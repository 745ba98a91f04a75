use core_types::PlayerId;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for a report run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the monthly hand collections live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection string. When unset, `DATABASE_URL` from the environment is used.
    pub uri: Option<String>,
    /// Name of the database holding the hand collections.
    pub name: String,
    /// Collections are named `<prefix><YYYY><MM>`, e.g. `game_202506`.
    pub partition_prefix: String,
    /// Server-side time limit for each partition query.
    pub query_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: None,
            name: "poker_data".to_string(),
            partition_prefix: "game_".to_string(),
            query_timeout_secs: 300,
        }
    }
}

/// What the report covers and where the export lands.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Game category a hand must carry to be counted.
    pub game_type: String,
    /// Players reported on when none are given on the command line.
    pub default_player_ids: Vec<PlayerId>,
    pub export_dir: PathBuf,
    /// CSV files are written as `<prefix>_<YYYY-MM-DD>.csv`.
    pub export_prefix: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            game_type: "RING".to_string(),
            default_player_ids: Vec::new(),
            export_dir: PathBuf::from("."),
            export_prefix: "user_stats".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "analyzer=debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
