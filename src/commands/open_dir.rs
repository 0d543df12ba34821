//! Open-dir command - Show the folder holding storage.json

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use std::process::Command;

use cursor_id_reset::config::Settings;

/// File manager command for this platform
fn opener() -> &'static str {
    if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Execute the open-dir command
pub fn execute(settings: &Settings) -> Result<()> {
    let dir = settings
        .storage_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    if !dir.exists() {
        bail!("Config directory does not exist: {}", dir.display());
    }

    println!("Config directory: {}", dir.display());

    Command::new(opener())
        .arg(dir)
        .spawn()
        .with_context(|| format!("Failed to run {}", opener()))?;

    println!("{}", "Opened config directory".green());
    Ok(())
}
