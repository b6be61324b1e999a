//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` filter directive for the ringdesk crates.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Debug => "ringdesk=debug",
            Self::Info => "ringdesk=info",
            Self::Warning => "ringdesk=warn",
            Self::Error => "ringdesk=error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
