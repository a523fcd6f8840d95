//! Configuration for signature computation.
//!
//! Settings are read from `.propsig.toml` in the working directory or one of
//! its ancestors. A missing or invalid file yields the defaults.

mod accessors;
mod core;
mod loader;

pub use accessors::get_config;
pub use self::core::{default_fixed_length, default_max_inputs, SignatureConfig};
pub use loader::{
    discover_config, load_config, load_config_from, parse_and_validate_config, search_dirs,
    CONFIG_FILE_NAME,
};
