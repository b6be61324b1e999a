//! Hosted application settings.

use serde::{Deserialize, Serialize};

/// The remote web application wrapped by the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL loaded into the root window.
    pub url: String,
    /// Root window title.
    pub title: String,
    /// User agent override. When unset the webview's own agent is used,
    /// with the shell's product token stripped.
    pub user_agent: Option<String>,
    /// Open devtools in every window.
    pub devtools: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: "https://app.ringcentral.com".into(),
            title: "RingCentral (Community)".into(),
            user_agent: None,
            devtools: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults() {
        let config = AppConfig::default();
        assert!(config.user_agent.is_none());
        assert!(!config.devtools);
    }

    #[test]
    fn app_config_user_agent_override() {
        let config: AppConfig = toml::from_str(r#"user_agent = "Mozilla/5.0 Test""#).unwrap();
        assert_eq!(config.user_agent.as_deref(), Some("Mozilla/5.0 Test"));
        assert_eq!(config.url, "https://app.ringcentral.com");
    }
}
