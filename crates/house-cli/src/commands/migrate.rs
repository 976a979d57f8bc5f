//! Migrate command
//!
//! Usage: house migrate [--db PATH]

use anyhow::Context;
use clap::Args;

use super::DbArgs;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Apply pending migrations and list the ones recorded
pub fn execute(args: MigrateArgs) -> anyhow::Result<()> {
    let conn = house_store::db::connect(&args.db.path)
        .with_context(|| format!("cannot open database {}", args.db.path.display()))?;

    let applied = house_store::migrations::applied_migrations(&conn)?;
    for id in &applied {
        println!("applied {id}");
    }
    println!("{} migration(s) at {}", applied.len(), args.db.path.display());

    Ok(())
}
