//! Logging setup
//!
//! Console logging goes to stderr, filtered by `FLOCKPROBE_LOG` (default
//! `warn`, `debug` with `--verbose`). With `FLOCKPROBE_ENABLE_LOGGING=1` the
//! same events are appended to a log file in the user's data directory,
//! rotated to `.log.bak` once it grows past [`MAX_LOG_BYTES`].

use crate::constants::{APP_NAME, ENV_ENABLE_FILE_LOGGING, ENV_LOG_FILTER, MAX_LOG_BYTES};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file = file_logging_enabled()
        .then(open_log_file)
        .flatten()
        .map(|file| fmt::layer().with_writer(Mutex::new(file)).with_ansi(false));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init();
}

fn file_logging_enabled() -> bool {
    std::env::var(ENV_ENABLE_FILE_LOGGING)
        .map(|v| v == "1")
        .unwrap_or(false)
}

/// `<data_local_dir>/flockprobe/logs/flockprobe.log`, or `./logs` without a home
pub fn log_file_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    let filename = if cfg!(debug_assertions) {
        format!("{APP_NAME}-dev.log")
    } else {
        format!("{APP_NAME}.log")
    };
    base.join(APP_NAME).join("logs").join(filename)
}

fn open_log_file() -> Option<File> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    rotate_if_needed(&path, MAX_LOG_BYTES);
    OpenOptions::new().create(true).append(true).open(&path).ok()
}

/// Move `path` to `<path>.bak` when it is larger than `max_bytes`
fn rotate_if_needed(path: &Path, max_bytes: u64) {
    if let Ok(meta) = fs::metadata(path) {
        if meta.len() > max_bytes {
            let backup = path.with_extension("log.bak");
            let _ = fs::remove_file(&backup);
            let _ = fs::rename(path, &backup);
        }
    }
}
