// Notemark platform paths for Linux
// Config: ~/.config/notemark
// Data:   ~/.local/share/notemark

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Notemark on Linux.
/// Uses `$XDG_CONFIG_HOME/notemark` if set, otherwise `~/.config/notemark`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("notemark")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("notemark")
    }
}

/// Returns the data directory for Notemark on Linux.
/// Uses `$XDG_DATA_HOME/notemark` if set, otherwise `~/.local/share/notemark`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("notemark")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("notemark")
    }
}
