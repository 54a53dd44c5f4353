//! Where `eighty` keeps its files on disk
//!
//! ```text
//! <config>/eighty/
//!   config.yaml        engine defaults
//!   themes/<id>.yaml   user palettes, shadowing the built-ins
//!   logs/eighty.log.*  daily debug logs
//! ```
//!
//! `<config>` is `$XDG_CONFIG_HOME` or `~/.config`, and `%APPDATA%` on Windows.

use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "eighty";

/// Platform config root, before the app directory is appended
fn config_root() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return std::env::var_os("APPDATA").map(PathBuf::from);
    }
    // Not dirs::config_dir(): macOS users expect ~/.config too
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

pub fn config_dir() -> Option<PathBuf> {
    config_root().map(|root| root.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

/// User override for theme `id`, whether or not it exists
pub fn user_theme_file(id: &str) -> Option<PathBuf> {
    themes_dir().map(|dir| dir.join(format!("{}.yaml", id)))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or("no home or config directory")?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("cannot create {}: {}", logs.display(), e))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_theme_file_is_yaml_in_themes_dir() {
        if let (Some(dir), Some(file)) = (themes_dir(), user_theme_file("black")) {
            assert_eq!(file, dir.join("black.yaml"));
        }
    }
}
