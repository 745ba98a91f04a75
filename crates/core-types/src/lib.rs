pub mod decode;
pub mod enums;
pub mod error;
pub mod ids;
pub mod query;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{GameFormat, SHOWDOWN_STATE, UNCALLED_ACTION};
pub use error::CoreError;
pub use ids::{HandId, PlayerId};
pub use query::{ReportQuery, TimeWindow};
pub use structs::{HandRecord, Participant, PotDistribution, PotWinner, WagerEvent};
