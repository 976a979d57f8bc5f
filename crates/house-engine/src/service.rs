//! House service - keeps the mirror and the database in step
//!
//! Reads are answered from the `MirrorCache` alone. Writes go to the
//! database first and touch the mirror only after the database transaction
//! committed, so a failed write leaves both sides exactly as they were.
//!
//! Locking:
//! - the connection mutex is held for the whole of a write, from name
//!   resolution to the mirror update, which serialises writers;
//! - the mirror `RwLock` is taken for reading by queries and for writing
//!   only around the in-memory mutation.

#![allow(clippy::result_large_err)]

use house_core::errors::HouseError;
use house_core::{log_op_end, log_op_error, log_op_start};
use house_core::{MirrorCache, Room};
use house_store::errors::Result;
use house_store::{scan_all, RoomRepo};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

const OP_LOAD_ALL: &str = "load_all";
const OP_CREATE_ROOM: &str = "create_room";
const OP_DELETE_ROOM: &str = "delete_room";

/// Owner of the database connection and the room mirror
pub struct HouseService {
    conn: Mutex<Connection>,
    mirror: RwLock<MirrorCache>,
}

impl HouseService {
    /// Build the service over an open, migrated connection
    ///
    /// Scans the whole database into the mirror before returning.
    pub fn open(conn: Connection) -> Result<Self> {
        let started = Instant::now();
        log_op_start!(OP_LOAD_ALL);

        let rooms = match scan_all(&conn) {
            Ok(rooms) => rooms,
            Err(err) => {
                log_op_error!(OP_LOAD_ALL, err.clone(), duration_ms = elapsed_ms(started));
                return Err(err);
            }
        };

        let mut mirror = MirrorCache::new();
        mirror.load_all(rooms);

        log_op_end!(
            OP_LOAD_ALL,
            duration_ms = elapsed_ms(started),
            room_count = mirror.len() as u64
        );

        Ok(Self {
            conn: Mutex::new(conn),
            mirror: RwLock::new(mirror),
        })
    }

    /// Connect to the database at `path` and build the service
    ///
    /// Fails with `Unavailable` when the database cannot be opened.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = house_store::db::connect(path)?;
        Self::open(conn)
    }

    /// All rooms in mirror order
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.read_mirror()?.get_all().to_vec())
    }

    /// First room named `name`, ignoring case
    pub fn get_room(&self, name: &str) -> Result<Option<Room>> {
        Ok(self.read_mirror()?.find_by_name(name).cloned())
    }

    pub fn room_count(&self) -> Result<usize> {
        Ok(self.read_mirror()?.len())
    }

    /// Persist a room with its doors, then mirror it
    ///
    /// An empty name is replaced by `DEFAULT_ROOM_NAME`. Returns the room as
    /// stored, carrying its new identifier. On a database failure nothing is
    /// persisted, the mirror is untouched, and the error is returned.
    pub fn create_room(&self, room: Room) -> Result<Room> {
        let started = Instant::now();
        let room = room.with_default_name();
        let name = room.name.clone();
        log_op_start!(
            OP_CREATE_ROOM,
            room_name = name.as_str(),
            door_count = room.doors.len() as u64
        );

        match self.persist_room(room) {
            Ok(stored) => {
                log_op_end!(
                    OP_CREATE_ROOM,
                    duration_ms = elapsed_ms(started),
                    room_id = stored.id,
                    room_name = name.as_str()
                );
                Ok(stored)
            }
            Err(err) => {
                log_op_error!(
                    OP_CREATE_ROOM,
                    err.clone(),
                    duration_ms = elapsed_ms(started),
                    room_name = name.as_str()
                );
                Err(err)
            }
        }
    }

    /// Delete the first room named `name` (ignoring case) and its doors
    ///
    /// Returns the removed room, or `None` when no room matched. On a
    /// database failure the mirror is untouched and the error is returned.
    pub fn delete_room(&self, name: &str) -> Result<Option<Room>> {
        let started = Instant::now();
        log_op_start!(OP_DELETE_ROOM, room_name = name);

        match self.remove_room(name) {
            Ok(Some(removed)) => {
                log_op_end!(
                    OP_DELETE_ROOM,
                    duration_ms = elapsed_ms(started),
                    room_id = removed.id,
                    room_name = name,
                    found = true
                );
                Ok(Some(removed))
            }
            Ok(None) => {
                log_op_end!(
                    OP_DELETE_ROOM,
                    duration_ms = elapsed_ms(started),
                    room_name = name,
                    found = false
                );
                Ok(None)
            }
            Err(err) => {
                log_op_error!(
                    OP_DELETE_ROOM,
                    err.clone(),
                    duration_ms = elapsed_ms(started),
                    room_name = name
                );
                Err(err)
            }
        }
    }

    /// Scan the database directly, bypassing the mirror
    ///
    /// Diagnostic only: used to check that mirror and database agree.
    pub fn scan_store(&self) -> Result<Vec<Room>> {
        let conn = self.lock_conn()?;
        scan_all(&conn)
    }

    fn persist_room(&self, room: Room) -> Result<Room> {
        let mut conn = self.lock_conn()?;
        let id = RoomRepo::insert_room(&mut conn, &room)?;

        let stored = Room { id, ..room };
        self.write_mirror_after_commit().append(stored.clone());
        Ok(stored)
    }

    /// Held connection lock keeps other writers out until the mirror is updated
    fn remove_room(&self, name: &str) -> Result<Option<Room>> {
        let mut conn = self.lock_conn()?;

        let target = self.read_mirror()?.find_by_name(name).cloned();
        let Some(target) = target else {
            return Ok(None);
        };

        RoomRepo::delete_room(&mut conn, target.id)?;
        self.write_mirror_after_commit().remove_by_id(target.id);
        Ok(Some(target))
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            HouseError::LockPoisoned {
                resource: "connection".to_string(),
            }
            .into()
        })
    }

    fn read_mirror(&self) -> Result<RwLockReadGuard<'_, MirrorCache>> {
        self.mirror.read().map_err(|_| {
            HouseError::LockPoisoned {
                resource: "mirror".to_string(),
            }
            .into()
        })
    }

    /// Mirror write guard for a change the database already committed
    ///
    /// A poisoned guard is recovered rather than reported: the mirror's
    /// operations cannot leave it half-updated, and refusing the update here
    /// would let mirror and database disagree.
    fn write_mirror_after_commit(&self) -> RwLockWriteGuard<'_, MirrorCache> {
        self.mirror.write().unwrap_or_else(|poisoned| {
            tracing::warn!(component = module_path!(), "recovering poisoned mirror lock");
            PoisonError::into_inner(poisoned)
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
