//! Config command implementation.
//!
//! Shows, initializes and locates the settings file.

use crate::settings::Settings;
use anyhow::{Result, bail};
use std::path::Path;

/// Print the effective settings as JSON.
pub(crate) fn show(settings: &Settings, path: &Path) -> Result<()> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "defaults (no settings file)".to_string()
    };
    eprintln!("Settings from: {source}");
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

/// Write the default settings file.
pub(crate) fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Settings file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    Settings::default().save(path)?;
    println!("Settings written to: {}", path.display());
    Ok(())
}

/// Print the settings file location.
pub(crate) fn print_path(path: &Path) {
    println!("{}", path.display());
}
