use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

// Keeps the non-blocking file writer flushing for the whole process.
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Console output plus a daily-rolled `rugguard.log`, filtered by `RUST_LOG`
/// or the configured level. Calling twice is a no-op.
pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        &paths.logs_dir,
        "rugguard.log",
    ));
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    tracing::info!(logs = %paths.logs_dir.display(), "tracing initialized");
    Ok(())
}
