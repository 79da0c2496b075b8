//! Platform-specific directory utilities
//!
//! Follows platform conventions for data and cache directories, falling back
//! to paths relative to the working directory when no home is known.

use std::path::PathBuf;

const APP_NAME: &str = "sheet";

/// Directory holding the character database.
///
/// - macOS: `~/Library/Application Support/sheet`
/// - Linux: `~/.local/share/sheet` (or `$XDG_DATA_HOME/sheet`)
/// - Windows: `%APPDATA%\sheet`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Directory holding per-session log directories.
///
/// - macOS: `~/Library/Caches/sheet/logs`
/// - Linux: `~/.cache/sheet/logs` (or `$XDG_CACHE_HOME/sheet/logs`)
/// - Windows: `%LOCALAPPDATA%\sheet\logs`
/// - Fallback: `./logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
