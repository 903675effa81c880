//! Data directory resolution.
//!
//! The data directory holds `config.toml`.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "THREADCITE_DATA_DIR";

/// Resolve the threadcite data directory.
///
/// Checks `THREADCITE_DATA_DIR` first, then falls back to `~/.threadcite`,
/// and finally `./.threadcite` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok(), dirs::home_dir())
}

fn data_dir_from(env_override: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_override.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".threadcite");
    }

    // Last resort: current directory
    PathBuf::from(".threadcite")
}
