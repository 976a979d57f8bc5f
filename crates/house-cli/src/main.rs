//! House CLI
//!
//! Runs the house rooms service and a few maintenance commands.
//!
//! Environment variables (a `.env` file is honoured when present):
//! - `HOUSE_DB_PATH`: SQLite database file (default `./db/house.db`)
//! - `HOUSE_BIND_ADDR`: listen address for `serve` (default `0.0.0.0:8080`)
//! - `HOUSE_LOG_FORMAT`: `dev` or `json` (default `dev`)
//! - `RUST_LOG`: overrides the log filter

use clap::{Parser, Subcommand, ValueEnum};
use house_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "house")]
#[command(about = "House - rooms and doors over HTTP", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(
        long,
        global = true,
        env = "HOUSE_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Dev
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines
    Dev,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    fn profile(self) -> Profile {
        match self {
            LogFormat::Dev => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve(commands::serve::ServeArgs),
    /// Apply pending schema migrations and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect stored rooms
    Rooms(commands::rooms::RoomsArgs),
}

fn main() {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging_facility::init(cli.log_format.profile());

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args),
        Commands::Migrate(args) => commands::migrate::execute(args),
        Commands::Rooms(args) => commands::rooms::execute(args),
    };

    if let Err(e) = result {
        tracing::error!(err = %format!("{e:#}"), "command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
