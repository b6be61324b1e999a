//! Screen capture configuration.

use serde::{Deserialize, Serialize};

/// How a capture source is chosen when the page asks to share its screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SelectionMode {
    /// Pick `Auto` under a compositor with its own picker, `Manual` otherwise.
    #[default]
    Detect,
    /// Hand the first screen straight to the compositor picker.
    Auto,
    /// Show the in-page source picker overlay.
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CaptureConfig {
    pub selection: SelectionMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_mode_serialization() {
        let json = serde_json::to_string(&SelectionMode::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
        let parsed: SelectionMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, SelectionMode::Auto);
    }
}
