// Integration tests for hydration from file-backed databases

use house_core::model::{Door, Room};
use house_core::ExErrorKind;
use house_store::{scan_all, RoomRepo};

#[test]
fn test_rooms_survive_reopen() {
    // Given: Rooms written through one connection
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("house.db");
    {
        let mut conn = house_store::db::connect(&path).unwrap();
        RoomRepo::insert_room(&mut conn, &Room::new("Kitchen").with_door("Hall")).unwrap();
        RoomRepo::insert_room(&mut conn, &Room::new("Bedroom")).unwrap();
    }

    // When: The database is reopened and scanned
    let conn = house_store::db::connect(&path).unwrap();
    let rooms = scan_all(&conn).unwrap();

    // Then: Both rooms come back with their doors
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].name, "Kitchen");
    assert_eq!(rooms[0].doors, vec![Door::new("Hall")]);
    assert_eq!(rooms[1].name, "Bedroom");
    assert!(rooms[1].doors.is_empty());
}

#[test]
fn test_connect_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db").join("house.db");

    house_store::db::connect(&path).unwrap();

    assert!(path.exists());
}

#[test]
fn test_connect_unreachable_path_is_unavailable() {
    // Given: A path whose parent is a regular file
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().join("house.db");

    // When: The store is opened
    let err = house_store::db::connect(&path).unwrap_err();

    // Then: The failure is classified as unavailable and keeps its cause
    assert_eq!(err.kind(), ExErrorKind::Unavailable);
    assert_eq!(err.op(), Some("open_store"));
    assert!(err.source_error().is_some());
}

#[test]
fn test_legacy_null_columns_hydrate_as_zero_values() {
    let mut conn = house_store::db::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE Rooms (RoomID INTEGER PRIMARY KEY AUTOINCREMENT, Name TEXT, Size INTEGER,
                             WindowCount INTEGER, WallDecorationType TEXT, Floor INTEGER);
         CREATE TABLE Doors (RoomID INTEGER, Destination TEXT);
         INSERT INTO Rooms (Name) VALUES ('Pantry');
         INSERT INTO Doors (RoomID, Destination) VALUES (1, NULL);",
    )
    .unwrap();
    house_store::migrations::apply_migrations(&mut conn).unwrap();

    let rooms = scan_all(&conn).unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].name, "Pantry");
    assert_eq!(rooms[0].size, 0);
    assert_eq!(rooms[0].wall_decoration_type, "");
    assert_eq!(rooms[0].doors, vec![Door::new("")]);
}
