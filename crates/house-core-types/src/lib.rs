//! Core types shared by the house service crates
//!
//! - **Correlation types**: RequestId, RequestContext
//! - **Schema constants**: Canonical log field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};
