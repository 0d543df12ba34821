//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// How long to wait for a killed process to exit
pub const TERMINATE_TIMEOUT: Duration = Duration::from_secs(3);

/// Pause after terminating Cursor before touching storage.json
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Get the Cursor global storage directory
/// - macOS: ~/Library/Application Support/Cursor/User/globalStorage/
/// - Linux: ~/.config/Cursor/User/globalStorage/
/// - Windows: %APPDATA%/Cursor/User/globalStorage/
pub fn global_storage_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join("Cursor")
            .join("User")
            .join("globalStorage"))
    }

    #[cfg(not(target_os = "macos"))]
    {
        // dirs maps this to ~/.config on Linux and %APPDATA% on Windows
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config.join("Cursor").join("User").join("globalStorage"))
    }
}

/// Path to globalStorage/storage.json, which holds the telemetry IDs
pub fn storage_json_path() -> Result<PathBuf> {
    Ok(global_storage_dir()?.join("storage.json"))
}

/// Process name Cursor runs under on this platform
pub fn default_process_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "Cursor.exe"
    } else if cfg!(target_os = "macos") {
        "Cursor"
    } else {
        "cursor"
    }
}

/// Usual install locations, used to launch Cursor when it was not running
pub fn install_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    #[cfg(target_os = "windows")]
    {
        if let Some(local) = dirs::data_local_dir() {
            candidates.push(local.join("Programs").join("Cursor").join("Cursor.exe"));
        }
        for var in ["PROGRAMFILES", "PROGRAMFILES(X86)"] {
            if let Some(dir) = std::env::var_os(var) {
                candidates.push(PathBuf::from(dir).join("Cursor").join("Cursor.exe"));
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/Applications/Cursor.app/Contents/MacOS/Cursor"));
        if let Some(home) = dirs::home_dir() {
            candidates.push(
                home.join("Applications")
                    .join("Cursor.app")
                    .join("Contents")
                    .join("MacOS")
                    .join("Cursor"),
            );
        }
    }

    #[cfg(target_os = "linux")]
    {
        candidates.push(PathBuf::from("/usr/bin/cursor"));
        candidates.push(PathBuf::from("/opt/Cursor/cursor"));
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".local").join("bin").join("cursor"));
            candidates.push(home.join("Applications").join("cursor.AppImage"));
        }
    }

    candidates
}

/// Resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// storage.json to read and rewrite
    pub storage_path: PathBuf,
    /// Name used to find running Cursor processes
    pub process_name: String,
    /// Fallback executables when Cursor is not running
    pub install_candidates: Vec<PathBuf>,
    pub terminate_timeout: Duration,
    pub settle_delay: Duration,
}

impl Settings {
    /// Build settings from platform defaults, applying any CLI overrides
    pub fn resolve(storage: Option<PathBuf>, process_name: Option<String>) -> Result<Self> {
        let storage_path = match storage {
            Some(path) => path,
            None => storage_json_path().context("Failed to locate storage.json")?,
        };

        Ok(Self {
            storage_path,
            process_name: process_name.unwrap_or_else(|| default_process_name().to_string()),
            install_candidates: install_candidates(),
            terminate_timeout: TERMINATE_TIMEOUT,
            settle_delay: SETTLE_DELAY,
        })
    }

    /// First install candidate that exists on disk
    pub fn installed_executable(&self) -> Option<PathBuf> {
        self.install_candidates.iter().find(|p| p.exists()).cloned()
    }
}
