use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("surface error: {0}")]
    Surface(String),

    #[error("unknown surface: {0}")]
    UnknownSurface(u64),

    #[error("external open failed: {0}")]
    ExternalOpen(String),

    #[error("capture error: {0}")]
    Capture(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed envelope: {0}")]
    Malformed(String),

    #[error("invalid body for {event}: {reason}")]
    InvalidBody { event: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RingdeskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("window.width = 0".into());
        assert_eq!(err.to_string(), "config validation error: window.width = 0");
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::UnknownSurface(7);
        assert_eq!(err.to_string(), "unknown surface: 7");

        let err = PlatformError::ExternalOpen("mailto:x: no handler".into());
        assert_eq!(err.to_string(), "external open failed: mailto:x: no handler");
    }

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::InvalidBody {
            event: "WINDOW_MANAGER_SET_BOUNDS".into(),
            reason: "missing field `bounds`".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid body for WINDOW_MANAGER_SET_BOUNDS: missing field `bounds`"
        );
    }

    #[test]
    fn ringdesk_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: RingdeskError = config_err.into();
        assert!(matches!(err, RingdeskError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn ringdesk_error_from_platform() {
        let platform_err = PlatformError::ExternalOpen("no browser".into());
        let err: RingdeskError = platform_err.into();
        assert!(matches!(err, RingdeskError::Platform(_)));
        assert!(err.to_string().contains("no browser"));
    }

    #[test]
    fn ringdesk_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RingdeskError = io_err.into();
        assert!(matches!(err, RingdeskError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
