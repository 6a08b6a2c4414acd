// Notemark platform paths for Windows
// Config: %APPDATA%/Notemark
// Data:   %APPDATA%/Notemark

use std::env;
use std::path::PathBuf;

fn appdata() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata)
}

/// Returns the configuration directory for Notemark on Windows.
/// `%APPDATA%/Notemark`
pub fn get_config_dir() -> PathBuf {
    appdata().join("Notemark")
}

/// Returns the data directory for Notemark on Windows.
/// `%APPDATA%/Notemark`
pub fn get_data_dir() -> PathBuf {
    appdata().join("Notemark")
}
