//! Link routing configuration.

use serde::{Deserialize, Serialize};

/// Decides which URLs stay inside the shell and which go to the OS browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// URL prefixes that may open as in-app child windows when the page
    /// opens a new top-level target.
    pub in_app_prefixes: Vec<String>,
    /// Substrings marking an external meeting link. These always leave
    /// the shell, whether requested explicitly or by navigation.
    pub external_patterns: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            in_app_prefixes: vec!["https://v.ringcentral.com".into()],
            external_patterns: vec!["https://meetings.ringcentral.com".into()],
        }
    }
}
