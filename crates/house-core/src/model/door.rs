use serde::{Deserialize, Serialize};

/// Door - a connection leading out of the room that owns it
///
/// A Door has no identity of its own. It lives in exactly one Room's door
/// list and disappears with that Room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Door {
    /// Free-text label of where the door leads (a room name, a direction)
    pub destination: String,
}

impl Door {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_wire_shape() {
        let json = serde_json::to_value(Door::new("Hallway")).unwrap();
        assert_eq!(json, serde_json::json!({ "destination": "Hallway" }));
    }

    #[test]
    fn test_door_missing_destination_defaults_to_empty() {
        let door: Door = serde_json::from_str("{}").unwrap();
        assert_eq!(door.destination, "");
    }
}
