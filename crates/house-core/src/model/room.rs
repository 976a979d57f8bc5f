use serde::{Deserialize, Deserializer, Serialize};

use super::door::Door;
use crate::errors::{HouseError, Result};

/// Store-assigned room identifier
pub type RoomId = i64;

/// Name given to rooms created without one
pub const DEFAULT_ROOM_NAME: &str = "no-name";

/// Room - a named space in the house together with the doors leading out of it
///
/// The wire form uses camelCase keys:
/// `{id, name, size, windowCount, wallDecorationType, floor, doors}`.
/// Every key is optional on input; missing keys take their zero value, so
/// `Room::default()` doubles as the "no such room" answer of a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Room {
    /// Identifier assigned by the store on insert (0 until persisted)
    pub id: RoomId,

    /// Display name, matched case-insensitively and not required to be unique
    pub name: String,

    pub size: i64,

    pub window_count: i64,

    pub wall_decoration_type: String,

    pub floor: i64,

    /// Doors in insertion order
    #[serde(deserialize_with = "null_as_empty")]
    pub doors: Vec<Door>,
}

impl Room {
    /// Create an unpersisted room with the given name and no doors
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a door leading to `destination`
    pub fn with_door(mut self, destination: impl Into<String>) -> Self {
        self.doors.push(Door::new(destination));
        self
    }

    /// Decode a room from a JSON request body
    ///
    /// # Errors
    /// Returns `MalformedRoom` when the body is not a JSON object of the room shape.
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| HouseError::MalformedRoom {
            reason: e.to_string(),
        })
    }

    /// Substitute `DEFAULT_ROOM_NAME` when the name is empty
    pub fn with_default_name(mut self) -> Self {
        if self.name.is_empty() {
            self.name = DEFAULT_ROOM_NAME.to_string();
        }
        self
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Compare two room names ignoring case
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Door>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Door>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room() {
        let room = Room::new("Kitchen").with_door("Hallway");

        assert_eq!(room.id, 0);
        assert_eq!(room.name, "Kitchen");
        assert_eq!(room.doors, vec![Door::new("Hallway")]);
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let room = Room {
            id: 7,
            name: "Study".to_string(),
            size: 12,
            window_count: 2,
            wall_decoration_type: "paint".to_string(),
            floor: 1,
            doors: vec![Door::new("Hallway")],
        };

        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Study",
                "size": 12,
                "windowCount": 2,
                "wallDecorationType": "paint",
                "floor": 1,
                "doors": [{ "destination": "Hallway" }]
            })
        );
    }

    #[test]
    fn test_missing_and_null_fields_decode_to_zero_values() {
        let room = Room::from_json_slice(br#"{"name":"Attic","doors":null}"#).unwrap();

        assert_eq!(room.name, "Attic");
        assert_eq!(room.size, 0);
        assert!(room.doors.is_empty());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let err = Room::from_json_slice(b"{not json").unwrap_err();
        assert!(matches!(err, HouseError::MalformedRoom { .. }));
    }

    #[test]
    fn test_default_name_only_replaces_empty_names() {
        assert_eq!(Room::new("").with_default_name().name, DEFAULT_ROOM_NAME);
        assert_eq!(Room::new(" ").with_default_name().name, " ");
        assert_eq!(Room::new("Den").with_default_name().name, "Den");
    }

    #[test]
    fn test_is_named_ignores_case() {
        let room = Room::new("Kitchen");
        assert!(room.is_named("kitchen"));
        assert!(room.is_named("KITCHEN"));
        assert!(!room.is_named("kitchens"));
    }

    #[test]
    fn test_default_room_is_the_empty_entity() {
        let json = serde_json::to_value(Room::default()).unwrap();
        assert_eq!(json["id"], 0);
        assert_eq!(json["name"], "");
        assert_eq!(json["doors"], serde_json::json!([]));
    }
}
