//! Canonical schema constants for structured logging
//!
//! Every log line emitted by the house crates uses these keys so that the
//! JSON output can be filtered without knowing which crate produced it.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_ROOM_ID: &str = "room_id";
pub const FIELD_ROOM_NAME: &str = "room_name";

// Collection sizes
pub const FIELD_ROOM_COUNT: &str = "room_count";
pub const FIELD_DOOR_COUNT: &str = "door_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
