use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("Task for partition {partition} did not complete: {source}")]
    TaskFailed {
        partition: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
