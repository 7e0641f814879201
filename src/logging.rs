//! File-backed tracing setup. The terminal belongs to the UI, so log
//! output never goes to stdout or stderr.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "femview=info";

/// `femview.log` in the data directory.
pub fn default_log_path() -> Option<PathBuf> {
    Some(crate::persistence::data_dir()?.join("femview.log"))
}

/// Install the global subscriber appending to `path` (or the default log
/// file). Returns the file in use, or `None` when no location is available.
pub fn init_logging(path: Option<&Path>) -> Result<Option<PathBuf>, String> {
    let path = match path.map(Path::to_path_buf).or_else(default_log_path) {
        Some(p) => p,
        None => return Ok(None),
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| format!("logging init: {}", e))?;

    Ok(Some(path))
}
