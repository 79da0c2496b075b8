//! Process configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use chrono::Utc;

use crate::dirs;

/// Configuration required to bootstrap a character service and front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `catalog.ron`, `rules.toml` and an optional `graph.ron`.
    pub data_dir: PathBuf,
    /// SQLite database file. `None` uses the platform data directory.
    pub database: Option<PathBuf>,
    /// Keep everything in memory and never touch a database file.
    pub in_memory: bool,
    pub session_id: Option<String>,
    /// Root of the per-session log directories. `None` uses the platform cache directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            database: None,
            in_memory: false,
            session_id: None,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub const DATABASE_FILE: &'static str = "sheet.sqlite3";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHEET_DATA_DIR` - Content directory (default: `./data`)
    /// - `SHEET_DATABASE` - SQLite file (default: platform data dir `sheet.sqlite3`)
    /// - `SHEET_IN_MEMORY` - Use an in-memory store (default: false)
    /// - `SHEET_SESSION_ID` - Log session name (default: timestamp)
    /// - `SHEET_LOG_DIR` - Log root directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("SHEET_DATA_DIR").filter(|dir| !dir.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config.database = lookup("SHEET_DATABASE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        if let Some(enable) = read_value::<bool>(&lookup, "SHEET_IN_MEMORY") {
            config.in_memory = enable;
        } else if lookup("SHEET_IN_MEMORY").is_some() {
            // Also accept just setting the variable without value as "true"
            config.in_memory = true;
        }

        config.session_id = lookup("SHEET_SESSION_ID").filter(|id| !id.is_empty());
        config.log_dir = lookup("SHEET_LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        config
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| dirs::data_dir().join(Self::DATABASE_FILE))
    }

    pub fn log_root(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(dirs::log_dir)
    }

    /// The configured session id, or one derived from the current time.
    pub fn session_id_or_default(&self) -> String {
        self.session_id
            .clone()
            .unwrap_or_else(|| format!("session_{}", Utc::now().format("%Y%m%d_%H%M%S")))
    }
}

fn read_value<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert!(config.database_path().ends_with(AppConfig::DATABASE_FILE));
        assert!(config.session_id_or_default().starts_with("session_"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("SHEET_DATA_DIR", "/srv/sheet/data"),
            ("SHEET_DATABASE", "/srv/sheet/db.sqlite3"),
            ("SHEET_SESSION_ID", "table-night"),
            ("SHEET_LOG_DIR", "/var/log/sheet"),
            ("SHEET_IN_MEMORY", "false"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/sheet/data"));
        assert_eq!(config.database_path(), PathBuf::from("/srv/sheet/db.sqlite3"));
        assert_eq!(config.session_id_or_default(), "table-night");
        assert_eq!(config.log_root(), PathBuf::from("/var/log/sheet"));
        assert!(!config.in_memory);
    }

    #[test]
    fn bare_in_memory_flag_enables_it() {
        assert!(config_from(&[("SHEET_IN_MEMORY", "")]).in_memory);
        assert!(config_from(&[("SHEET_IN_MEMORY", "true")]).in_memory);
    }
}
