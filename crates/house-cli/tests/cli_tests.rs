// End-to-end checks of the `house` binary against scratch databases

use house_core::model::{Door, Room};
use house_engine::HouseService;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn house(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_house"))
        .current_dir(dir.path())
        .env_remove("HOUSE_DB_PATH")
        .env_remove("HOUSE_BIND_ADDR")
        .env_remove("HOUSE_LOG_FORMAT")
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("failed to run house")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_migrate_creates_database_and_directory() {
    // Given: A database path whose directory does not exist yet
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("house.db");

    // When: `house migrate --db <path>` runs
    let output = house(&dir, &["migrate", "--db", path_arg(&db_path)]);

    // Then: It succeeds and reports the applied migration
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(db_path.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("001_house_schema"));
}

#[test]
fn test_rooms_list_prints_stored_rooms() {
    // Given: Rooms written through the service
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("house.db");
    {
        let service = HouseService::open_path(&db_path).unwrap();
        service
            .create_room(Room::new("Hall").with_door("Kitchen"))
            .unwrap();
        service.create_room(Room::new("Kitchen")).unwrap();
    }

    // When: `house rooms list` runs
    let output = house(&dir, &["rooms", "list", "--db", path_arg(&db_path)]);

    // Then: The rooms are printed as JSON in store order
    assert!(output.status.success());
    let rooms: Vec<Room> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].name, "Hall");
    assert_eq!(rooms[0].doors, vec![Door::new("Kitchen")]);
    assert_eq!(rooms[1].name, "Kitchen");
}

#[test]
fn test_db_path_read_from_environment() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("from-env.db");

    let output = Command::new(env!("CARGO_BIN_EXE_house"))
        .current_dir(dir.path())
        .env("HOUSE_DB_PATH", path_arg(&db_path))
        .env("RUST_LOG", "off")
        .arg("migrate")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(db_path.exists());
}

#[test]
fn test_unreachable_database_exits_non_zero() {
    // Given: A database path under a regular file
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let db_path = blocker.join("house.db");

    // When: The server is started on it
    let output = house(
        &dir,
        &["serve", "--db", path_arg(&db_path), "--bind", "127.0.0.1:0"],
    );

    // Then: It refuses to start
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("database unreachable"));
}
