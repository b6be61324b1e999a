//! ringdesk configuration system.
//!
//! TOML-based configuration with validation. All sections use sensible
//! defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{RingdeskConfig, CONFIG_SCHEMA_VERSION};

use ringdesk_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it on first run.
pub fn load_config() -> Result<RingdeskConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<RingdeskConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &RingdeskConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
