use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var consulted for the log filter
pub const LOG_ENV: &str = "RSVP_LOG";
const DEFAULT_FILTER: &str = "rsvp=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Send logs to `path`. The terminal belongs to the TUI, so logs never go to stdout/stderr.
///
/// Returns false (and leaves logging off) when the file can't be opened or a
/// subscriber is already installed.
pub fn init(path: Option<&Path>) -> bool {
    let Some(path) = path else {
        return false;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = File::options().create(true).append(true).open(path) else {
        return false;
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_without_path_is_disabled() {
        assert!(!init(None));
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("rsvp.log");
        // another test may have installed a subscriber first; the file is created either way
        let _ = init(Some(&path));
        assert!(path.exists());
    }
}
