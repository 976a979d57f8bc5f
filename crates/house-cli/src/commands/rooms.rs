//! Rooms command
//!
//! Usage: house rooms list [--db PATH]

use anyhow::Context;
use clap::{Args, Subcommand};
use house_core::Room;

use super::DbArgs;

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// Print every stored room as JSON, read straight from the database
    List {
        #[command(flatten)]
        db: DbArgs,
    },
}

pub fn execute(args: RoomsArgs) -> anyhow::Result<()> {
    match args.command {
        RoomsCommand::List { db } => {
            let conn = house_store::db::connect(&db.path)
                .with_context(|| format!("cannot open database {}", db.path.display()))?;
            let rooms = house_store::scan_all(&conn)?;
            println!("{}", render_rooms(&rooms)?);
            Ok(())
        }
    }
}

fn render_rooms(rooms: &[Room]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(rooms)?)
}
