//! Configuration schema types for ringdesk.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod app;
mod capture;
mod links;
mod system;
mod window;

pub use app::*;
pub use capture::*;
pub use links::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for ringdesk.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct RingdeskConfig {
    pub app: AppConfig,
    pub window: WindowConfig,
    pub links: LinksConfig,
    pub capture: CaptureConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_hosted_app() {
        let config = RingdeskConfig::default();
        assert_eq!(config.app.url, "https://app.ringcentral.com");
        assert_eq!(config.app.title, "RingCentral (Community)");
    }

    #[test]
    fn default_config_window_size() {
        let config = RingdeskConfig::default();
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.window.min_width, 640);
        assert_eq!(config.window.min_height, 480);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config: RingdeskConfig = toml::from_str("").unwrap();
        assert_eq!(config.capture.selection, SelectionMode::Detect);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.links.external_patterns.len(), 1);
    }

    #[test]
    fn partial_toml_keeps_other_sections() {
        let toml_str = r#"
[app]
url = "https://example.com"

[capture]
selection = "manual"
"#;
        let config: RingdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.url, "https://example.com");
        assert_eq!(config.capture.selection, SelectionMode::Manual);
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.app.title, "RingCentral (Community)");
    }
}
