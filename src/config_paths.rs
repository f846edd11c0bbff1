//! Where live-highlight keeps its settings and logs
//!
//! The highlight switch is persisted in `config.yaml` and rolling log files go
//! to `logs/`, both inside one per-user directory.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "live-highlight";

/// Per-user directory holding the highlight switch and logs.
///
/// `$XDG_CONFIG_HOME/live-highlight` when that variable is set, otherwise
/// `~/.config/live-highlight`. On Windows it sits under `%APPDATA%`.
/// `None` when no home directory can be determined.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// YAML file holding [`HighlightConfig`](crate::config::HighlightConfig)
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Target of the rolling file log written with `--log`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the log directory if needed, for the file appender
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
