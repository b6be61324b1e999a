use clap::Parser;

/// ringdesk: a desktop shell for the hosted RingCentral web app.
#[derive(Parser, Debug)]
#[command(name = "ringdesk", version, about)]
pub struct Args {
    /// Load this URL in the main window instead of the configured one.
    #[arg(long)]
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable web inspector in every window.
    #[arg(long)]
    pub debug: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args() {
        let args = Args::try_parse_from(["ringdesk"]).unwrap();
        assert!(args.url.is_none());
        assert!(args.config.is_none());
        assert!(!args.debug);
    }

    #[test]
    fn all_args() {
        let args = Args::try_parse_from([
            "ringdesk",
            "--url",
            "https://example.com",
            "--config",
            "/tmp/ringdesk.toml",
            "--log-level",
            "debug",
            "--debug",
        ])
        .unwrap();
        assert_eq!(args.url.as_deref(), Some("https://example.com"));
        assert_eq!(args.config.as_deref(), Some("/tmp/ringdesk.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.debug);
    }
}
