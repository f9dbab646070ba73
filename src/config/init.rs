use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::schema::Config;

const HEADER: &str = "\
# janlog configuration
#
# Ruleset fields:
#   startingPoints / basePoints  points each player starts with / breaks even at
#   uma                          one entry per rank, summing to 0
#   oka                          bonus for rank 1
#   useFloatingUma + umaMatrix   uma row chosen by how many players finish at or above basePoints
#   useChips                     keep chip counts on recorded matches
";

/// Write a starter config built from the built-in templates.
///
/// Refuses to replace an existing file unless `force` is set. The file is
/// written atomically so an interrupted write never leaves a partial config.
pub fn write_starter_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::from_templates())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    info!(path = %path.display(), "wrote starter config");
    Ok(())
}
