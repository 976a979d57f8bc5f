//! Repository layer for persisting rooms to SQLite
//!
//! `RoomRepo` writes; `hydration` reads everything back for the mirror

pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::RoomRepo;
