use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] mongodb::error::Error),

    #[error("Query against partition '{partition}' failed: {source}")]
    QueryError {
        partition: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("A hand document in partition '{partition}' could not be decoded: {source}")]
    DecodeError {
        partition: String,
        #[source]
        source: mongodb::bson::de::Error,
    },

    #[error("Partition '{0}' is unavailable.")]
    PartitionUnavailable(String),
}
