use std::fs;
use std::path::Path;

use super::core::SignatureConfig;
use crate::errors::{Result, SignatureError};

/// Name of the configuration file searched for in the working directory and
/// its ancestors.
pub const CONFIG_FILE_NAME: &str = ".propsig.toml";

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<SignatureConfig> {
    let config = toml::from_str::<SignatureConfig>(contents).map_err(|e| {
        SignatureError::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates the config at `path`.
pub fn load_config_from(path: &Path) -> Result<SignatureConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        SignatureError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_and_validate_config(&contents)
}

/// Candidate config in `dir`, skipped when absent, unreadable or invalid.
pub(crate) fn candidate_config(dir: &Path) -> Option<SignatureConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Skipping unreadable {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!(
                "Signature config from {}: fixed_length={}, max_inputs={}",
                path.display(),
                config.fixed_length,
                config.max_inputs
            );
            Some(config)
        }
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Directories searched for a config file: `start` and at most
/// `max_depth - 1` of its ancestors.
pub fn search_dirs(start: &Path, max_depth: usize) -> impl Iterator<Item = &Path> {
    start.ancestors().take(max_depth)
}

/// Finds the nearest config file at or above `start`, or returns defaults.
pub fn discover_config(start: &Path) -> SignatureConfig {
    const MAX_SEARCH_DEPTH: usize = 10;

    search_dirs(start, MAX_SEARCH_DEPTH)
        .find_map(candidate_config)
        .unwrap_or_else(|| {
            log::debug!(
                "No {} within {} levels of {}, using default signature config",
                CONFIG_FILE_NAME,
                MAX_SEARCH_DEPTH,
                start.display()
            );
            SignatureConfig::default()
        })
}

pub fn load_config() -> SignatureConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Working directory unavailable ({}), using default signature config",
                e
            );
            SignatureConfig::default()
        }
    }
}
