//! Serve command
//!
//! Usage: house serve [--db PATH] [--bind ADDR]
//!
//! The database must be reachable at startup; otherwise the command fails
//! and the process exits non-zero.

use anyhow::Context;
use clap::Args;
use house_api::{create_router, HouseState};
use house_engine::HouseService;
use tokio::net::TcpListener;
use tokio::signal;

use super::DbArgs;

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Address to listen on
    #[arg(long, env = "HOUSE_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,
}

pub fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
    runtime.block_on(serve(args))
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let db_path = args.db.path.clone();
    let service = tokio::task::spawn_blocking(move || HouseService::open_path(&db_path))
        .await
        .context("database startup task failed")?
        .with_context(|| format!("database unreachable at {}", args.db.path.display()))?;

    tracing::info!(
        db_path = %args.db.path.display(),
        room_count = service.room_count()?,
        "Mirror loaded"
    );

    let app = create_router(HouseState::new(service));

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("cannot bind {}", args.bind))?;
    tracing::info!(addr = %args.bind, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(err = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(err = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
