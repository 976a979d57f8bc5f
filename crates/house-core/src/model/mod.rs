pub mod door;
pub mod room;

pub use door::Door;
pub use room::{names_match, Room, RoomId, DEFAULT_ROOM_NAME};
