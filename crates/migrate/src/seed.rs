use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Copies the seed dataset into place when the working copy is missing.
/// Returns whether a copy was made; an existing working copy is never replaced.
pub fn seed_dataset(source: &Path, target: &Path) -> Result<bool> {
    if target.exists() || !source.exists() {
        return Ok(false);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::copy(source, target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;

    log::info!("Seeded {} from {}", target.display(), source.display());

    Ok(true)
}
