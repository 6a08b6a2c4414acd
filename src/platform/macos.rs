// Notemark platform paths for macOS
// Config: ~/Library/Application Support/Notemark
// Data:   ~/Library/Application Support/Notemark

use std::env;
use std::path::PathBuf;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for Notemark on macOS.
/// `~/Library/Application Support/Notemark`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Notemark")
}

/// Returns the data directory for Notemark on macOS.
/// `~/Library/Application Support/Notemark`
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}
