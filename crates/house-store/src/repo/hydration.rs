//! Hydration layer - loads every room from SQLite
//!
//! Rooms come back in storage order (`RoomID` ascending) with their doors
//! attached in the order they were inserted.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use house_core::model::{Door, Room, RoomId};
use house_core::{log_op_end, log_op_start};
use rusqlite::Connection;
use std::collections::HashMap;
use std::time::Instant;

const OP_SCAN_ALL: &str = "scan_all";

/// Read all rooms, then all doors, and attach each door to its room
///
/// Doors whose `RoomID` matches no room are skipped and reported at warn level.
/// Nullable legacy columns read as their zero value.
pub fn scan_all(conn: &Connection) -> Result<Vec<Room>> {
    let started = Instant::now();
    log_op_start!(OP_SCAN_ALL);

    let mut rooms = load_rooms(conn)?;
    let index: HashMap<RoomId, usize> = rooms
        .iter()
        .enumerate()
        .map(|(position, room)| (room.id, position))
        .collect();

    let mut orphaned = 0usize;
    let mut door_count = 0usize;
    for (room_id, destination) in load_doors(conn)? {
        match index.get(&room_id) {
            Some(&position) => {
                rooms[position].doors.push(Door::new(destination));
                door_count += 1;
            }
            None => orphaned += 1,
        }
    }

    if orphaned > 0 {
        tracing::warn!(
            component = module_path!(),
            op = OP_SCAN_ALL,
            orphaned_doors = orphaned,
            "skipped doors referencing missing rooms"
        );
    }

    log_op_end!(
        OP_SCAN_ALL,
        duration_ms = started.elapsed().as_millis() as u64,
        room_count = rooms.len() as u64,
        door_count = door_count as u64
    );

    Ok(rooms)
}

fn load_rooms(conn: &Connection) -> Result<Vec<Room>> {
    let mut stmt = conn
        .prepare(
            "SELECT RoomID, Name, Size, WindowCount, WallDecorationType, Floor
             FROM Rooms ORDER BY RoomID",
        )
        .map_err(|e| from_rusqlite(e).with_op(OP_SCAN_ALL))?;

    let rooms = stmt
        .query_map([], |row| {
            Ok(Room {
                id: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                size: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
                window_count: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
                wall_decoration_type: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                floor: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
                doors: Vec::new(),
            })
        })
        .map_err(|e| from_rusqlite(e).with_op(OP_SCAN_ALL))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_rusqlite(e).with_op(OP_SCAN_ALL))?;

    Ok(rooms)
}

fn load_doors(conn: &Connection) -> Result<Vec<(RoomId, String)>> {
    let mut stmt = conn
        .prepare("SELECT RoomID, Destination FROM Doors ORDER BY rowid")
        .map_err(|e| from_rusqlite(e).with_op(OP_SCAN_ALL))?;

    let doors = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, RoomId>(0)?,
                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            ))
        })
        .map_err(|e| from_rusqlite(e).with_op(OP_SCAN_ALL))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_rusqlite(e).with_op(OP_SCAN_ALL))?;

    Ok(doors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use crate::repo::RoomRepo;

    #[test]
    fn test_scan_empty_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        assert!(scan_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_orphaned_doors_are_skipped() {
        // Given: A room with one door plus a door pointing at no room
        let capture = house_core::logging_facility::init_test_capture();
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        let room = Room::new("Kitchen").with_door("Hall");
        let id = RoomRepo::insert_room(&mut conn, &room).unwrap();
        // Legacy databases were written without foreign key enforcement
        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        conn.execute(
            "INSERT INTO Doors (RoomID, Destination) VALUES (?1, 'Nowhere')",
            [id + 100],
        )
        .unwrap();
        let stored: i64 = conn
            .query_row("SELECT COUNT(*) FROM Doors", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, 2);

        // When: Everything is scanned
        let rooms = scan_all(&conn).unwrap();

        // Then: The room keeps only its own door
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, id);
        assert_eq!(rooms[0].doors, vec![Door::new("Hall")]);
        let warned = capture.count_events(|e| {
            e.op.as_deref() == Some(OP_SCAN_ALL) && e.field("orphaned_doors") == Some("1")
        });
        assert!(warned >= 1);
    }
}
