//! # Hand-History Database Crate
//!
//! This crate is the read-side adapter to the document store holding hand
//! history, one collection per calendar month.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Encapsulates all store-specific logic (query documents, BSON
//!   normalization, collection naming) behind the `HandSource` trait, so the
//!   report pipeline never sees a driver type.
//! - **Asynchronous:** All reads are async; the MongoDB client pools connections
//!   internally and is cheap to share across partition tasks.
//!
//! ## Public API
//!
//! - `connect`: Opens the client and returns the configured database.
//! - `Partition`: A calendar month and its collection name.
//! - `HandSource`: The trait the pipeline reads through.
//! - `DbRepository`: The MongoDB-backed `HandSource`.
//! - `MemoryHandSource`: An in-memory `HandSource`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod partition;
pub mod repository;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use memory::MemoryHandSource;
pub use partition::Partition;
pub use repository::DbRepository;
pub use source::HandSource;
