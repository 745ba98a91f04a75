use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, LoggingSettings, ReportSettings};

/// Environment variables prefixed with this override file values,
/// e.g. `HANDSTATS__DATABASE__NAME=poker_archive`.
pub const ENV_PREFIX: &str = "HANDSTATS";

/// The file read when no other path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Loads the configuration from `path`, layering environment overrides on top.
///
/// A missing file is not an error: every setting has a default. The result is
/// validated before it is returned.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(
            config::File::from(path.as_ref())
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report.game_type.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "report.game_type must not be empty".to_string(),
        ));
    }
    if config.database.partition_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "database.partition_prefix must not be empty".to_string(),
        ));
    }
    if config.database.query_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "database.query_timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PlayerId;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.report.game_type, "RING");
        assert_eq!(config.database.name, "poker_data");
        assert_eq!(config.database.partition_prefix, "game_");
        assert!(config.report.default_player_ids.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [database]
            name = "archive"
            query_timeout_secs = 30

            [report]
            default_player_ids = [4815318, 5904209]
            export_prefix = "pbci"
            "#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.database.name, "archive");
        assert_eq!(config.database.query_timeout_secs, 30);
        assert_eq!(config.database.partition_prefix, "game_");
        assert_eq!(
            config.report.default_player_ids,
            vec![PlayerId(4815318), PlayerId(5904209)]
        );
        assert_eq!(config.report.export_prefix, "pbci");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database]\nquery_timeout_secs = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
