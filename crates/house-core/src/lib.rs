//! House Core - domain model and in-memory mirror
//!
//! This crate provides:
//! - Room and Door models with their JSON wire shape
//! - The Mirror Cache that serves every read of the service
//! - The structured error facility (`ExError`, `ExErrorKind`, `HouseError`)
//! - The logging facility and its canonical operation macros

pub mod errors;
pub mod logging_facility;
pub mod mirror;
pub mod model;

/// Re-exported so the logging macros resolve schema constants from any crate
pub use house_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, HouseError, Result};
pub use mirror::MirrorCache;
pub use model::{Door, Room, RoomId, DEFAULT_ROOM_NAME};
