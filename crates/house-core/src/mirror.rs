use crate::model::{Room, RoomId};

/// In-memory mirror of every persisted room
///
/// Serves all reads so that request handlers never query the database.
/// Rooms are kept in insertion order; name lookups are linear scans with
/// first-match-wins semantics, which is fine for the handful of rooms a
/// house has.
///
/// Not thread-safe on its own. The owner wraps it in a lock and only mutates
/// it after the matching database write has committed.
#[derive(Debug, Clone, Default)]
pub struct MirrorCache {
    rooms: Vec<Room>,
}

impl MirrorCache {
    /// Create an empty mirror
    pub fn new() -> Self {
        Self { rooms: Vec::new() }
    }

    /// Replace the whole content, keeping the given order
    pub fn load_all(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    /// All rooms in insertion order
    pub fn get_all(&self) -> &[Room] {
        &self.rooms
    }

    /// First room whose name matches `name` ignoring case
    ///
    /// `None` is the not-found answer; callers turn it into an empty room.
    pub fn find_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_named(name))
    }

    /// Add a room at the end
    pub fn append(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Remove the first room matching `name` ignoring case
    ///
    /// Returns whether a room was removed. The order of the remaining rooms
    /// is preserved.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        match self.rooms.iter().position(|room| room.is_named(name)) {
            Some(index) => {
                self.rooms.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the room with the given identifier
    ///
    /// Returns whether a room was removed. Order is preserved.
    pub fn remove_by_id(&mut self, id: RoomId) -> bool {
        match self.rooms.iter().position(|room| room.id == id) {
            Some(index) => {
                self.rooms.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
