//! # Repository Module
//!
//! SQLite repository implementations.
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - `local_storage`
//!   key/value rows holding persisted snapshots

pub mod snapshot;
