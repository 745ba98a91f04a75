use crate::error::DbError;
use configuration::DatabaseSettings;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::env;
use std::time::Duration;

/// Opens a client to the hand-history store and returns the configured database.
///
/// The URI comes from `settings.uri`, falling back to the `DATABASE_URL`
/// environment variable. A `ping` is issued before returning so an unreachable
/// server fails the run here rather than halfway through the partition queries.
pub async fn connect(settings: &DatabaseSettings) -> Result<Database, DbError> {
    let uri = match &settings.uri {
        Some(uri) => uri.clone(),
        None => env::var("DATABASE_URL").map_err(|_e| {
            DbError::ConnectionConfigError(
                "DATABASE_URL must be set when database.uri is not configured.".to_string(),
            )
        })?,
    };

    let mut options = ClientOptions::parse(&uri).await?;
    options.app_name = Some("handstats".to_string());
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));

    let client = Client::with_options(options)?;
    let database = client.database(&settings.name);
    database.run_command(doc! { "ping": 1 }, None).await?;

    tracing::info!(database = %settings.name, "Connected to hand-history store.");
    Ok(database)
}
