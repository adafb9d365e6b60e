use anyhow::Result;
use std::path::Path;

use crate::models::settings::AppSettings;

/// Prints the effective settings, or writes the defaults to `path` with `init`.
pub fn show_or_init_settings(path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        AppSettings::default().save(path)?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }
    let settings = AppSettings::load(path)?;
    settings.validate()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
