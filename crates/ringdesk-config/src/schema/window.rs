//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Initial and minimum size of the root window, in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            min_width: 640,
            min_height: 480,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_config_partial_toml() {
        let config: WindowConfig = toml::from_str("width = 1600").unwrap();
        assert_eq!(config.width, 1600);
        assert_eq!(config.height, 800);
    }
}
