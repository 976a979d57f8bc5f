//! House Store - SQLite persistence for rooms and doors
//!
//! Provides:
//! - Connection management and the startup reachability check
//! - Embedded, checksummed schema migrations
//! - The room repository (transactional insert and cascade delete)
//! - Hydration: a full scan of the database into hydrated `Room` values
//!
//! Every statement binds its values as parameters; no SQL is built from input.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{hydration::scan_all, RoomRepo};
