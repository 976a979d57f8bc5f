pub mod migrate;
pub mod rooms;
pub mod serve;

use clap::Args;
use std::path::PathBuf;

/// Database location shared by every command
#[derive(Debug, Args)]
pub struct DbArgs {
    /// Path to the SQLite database file; its directory is created if missing
    #[arg(long = "db", env = "HOUSE_DB_PATH", default_value = "./db/house.db")]
    pub path: PathBuf,
}
