use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "kalender-tui.log";

/// Send tracing output to `<dir>/kalender-tui.log`.
///
/// The terminal belongs to the UI, so nothing is written to stdout or
/// stderr. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(dir: &Path, level: &str) -> Result<()> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| eyre!("invalid RUST_LOG / log_level filter: {e}"))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(appender)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
