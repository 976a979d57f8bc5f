//! House Engine - orchestration layer
//!
//! Coordinates the database and the in-memory mirror behind `HouseService`,
//! the single entry point the HTTP layer and the CLI talk to.

pub mod service;

pub use service::HouseService;
