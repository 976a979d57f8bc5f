//! SQLite repository implementation
//!
//! Writes rooms and their doors. Each public operation runs in a single
//! transaction so a failure part-way leaves no rows behind.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use house_core::model::{Room, RoomId};
use rusqlite::{params, Connection};

const OP_INSERT_ROOM: &str = "insert_room";
const OP_DELETE_ROOM: &str = "delete_room";

/// SQLite repository for Rooms and Doors
pub struct RoomRepo;

impl RoomRepo {
    /// Persist a room and its doors, returning the generated identifier
    ///
    /// The `Rooms` row is written first, then one `Doors` row per door in
    /// sequence order. The first failing statement aborts the operation and
    /// the transaction is rolled back; no identifier is returned for
    /// partially written data. `room.id` is ignored.
    pub fn insert_room(conn: &mut Connection, room: &Room) -> Result<RoomId> {
        let tx = conn
            .transaction()
            .map_err(|e| from_rusqlite(e).with_op(OP_INSERT_ROOM))?;

        tx.execute(
            "INSERT INTO Rooms (Name, Size, WindowCount, WallDecorationType, Floor)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                room.name,
                room.size,
                room.window_count,
                room.wall_decoration_type,
                room.floor,
            ],
        )
        .map_err(|e| from_rusqlite(e).with_op(OP_INSERT_ROOM))?;

        let id = tx.last_insert_rowid();

        insert_doors(&tx, id, room)?;

        tx.commit()
            .map_err(|e| from_rusqlite(e).with_op(OP_INSERT_ROOM))?;

        Ok(id)
    }

    /// Delete a room and every door referencing it
    ///
    /// Returns the number of `Rooms` rows removed. Deleting an unknown
    /// identifier succeeds with zero rows affected.
    pub fn delete_room(conn: &mut Connection, id: RoomId) -> Result<usize> {
        let tx = conn
            .transaction()
            .map_err(|e| from_rusqlite(e).with_op(OP_DELETE_ROOM))?;

        // Doors first so the foreign key never points at a missing room
        tx.execute("DELETE FROM Doors WHERE RoomID = ?1", params![id])
            .map_err(|e| {
                from_rusqlite(e)
                    .with_op(OP_DELETE_ROOM)
                    .with_entity_id(id.to_string())
            })?;

        let removed = tx
            .execute("DELETE FROM Rooms WHERE RoomID = ?1", params![id])
            .map_err(|e| {
                from_rusqlite(e)
                    .with_op(OP_DELETE_ROOM)
                    .with_entity_id(id.to_string())
            })?;

        tx.commit()
            .map_err(|e| from_rusqlite(e).with_op(OP_DELETE_ROOM))?;

        Ok(removed)
    }
}

fn insert_doors(conn: &Connection, id: RoomId, room: &Room) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO Doors (RoomID, Destination) VALUES (?1, ?2)")
        .map_err(|e| from_rusqlite(e).with_op(OP_INSERT_ROOM))?;

    for door in &room.doors {
        stmt.execute(params![id, door.destination]).map_err(|e| {
            from_rusqlite(e)
                .with_op(OP_INSERT_ROOM)
                .with_entity_id(id.to_string())
        })?;
    }

    Ok(())
}
