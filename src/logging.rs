//! Diagnostic logging to a file
//!
//! The terminal belongs to the UI, so tracing output goes to a log file.
//! `RUST_LOG` wins over the configured level.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set and valid, else `level`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `path`.
///
/// When the file cannot be opened, or a subscriber is already installed,
/// logging is disabled and a notice goes to stderr; startup carries on.
pub fn init(path: &Path, level: &str) {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Logging disabled: cannot create {}: {}", dir.display(), e);
            return;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", path.display(), e);
            return;
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        eprintln!("Logging disabled: cannot install subscriber: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        // Must not panic on garbage
        let _ = env_filter("not a [valid filter");
    }

    #[test]
    fn test_second_init_does_not_panic() {
        let dir = std::env::temp_dir().join(format!("pgdba-log-{}", std::process::id()));
        let path = dir.join("pgdba.log");
        init(&path, "info");
        init(&path, "debug");
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_init_with_unwritable_path_does_not_panic() {
        init(Path::new("/proc/pgdba-definitely-not-writable/pgdba.log"), "info");
    }
}
