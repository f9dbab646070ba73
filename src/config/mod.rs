mod init;
mod schema;

pub use init::write_starter_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ruleset::validate_ruleset;

/// Get the config directory path (~/.config/janlog/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("janlog"))
}

/// Get the default config file path (~/.config/janlog/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With no explicit path, a missing default config falls back to the
/// built-in templates. An explicit path that does not exist is an error.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                debug!(path = %default_path.display(), "no config file, using built-in templates");
                return Ok(Config::from_templates());
            }
            default_path
        }
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    debug!(
        path = %config_path.display(),
        rulesets = config.rulesets.len(),
        "loaded config"
    );
    Ok(config)
}

/// Validate every ruleset in the config.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, ruleset) in config.rulesets.iter().enumerate() {
        let id = ruleset.ruleset_id.as_str();
        if id.trim().is_empty() {
            errors.push(format!("rulesets[{}]: rulesetId must not be empty", i));
        } else if !seen.insert(id) {
            errors.push(format!("rulesets[{}]: duplicate rulesetId '{}'", i, id));
        }

        if let Err(ruleset_errors) = validate_ruleset(ruleset) {
            errors.extend(
                ruleset_errors
                    .into_iter()
                    .map(|err| format!("rulesets[{}] ({}): {}", i, id, err)),
            );
        }
    }

    if let Some(ref default) = config.default_ruleset {
        if config.find_ruleset(default).is_none() {
            errors.push(format!(
                "default_ruleset: '{}' does not match any rulesetId",
                default
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
