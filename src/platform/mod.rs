// Notemark platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for Notemark.
///
/// - **Linux**: `~/.config/notemark` (or `$XDG_CONFIG_HOME/notemark`)
/// - **macOS**: `~/Library/Application Support/Notemark`
/// - **Windows**: `%APPDATA%/Notemark`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for Notemark. The SQLite
/// settings store lives here.
///
/// - **Linux**: `~/.local/share/notemark` (or `$XDG_DATA_HOME/notemark`)
/// - **macOS**: `~/Library/Application Support/Notemark`
/// - **Windows**: `%APPDATA%/Notemark`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the settings database.
pub fn default_db_path() -> PathBuf {
    get_data_dir().join("notemark.db")
}
