use std::sync::OnceLock;

use super::core::SignatureConfig;
use super::loader::load_config;

/// Cache the configuration
static CONFIG: OnceLock<SignatureConfig> = OnceLock::new();

/// Get the cached configuration
pub fn get_config() -> &'static SignatureConfig {
    CONFIG.get_or_init(load_config)
}
