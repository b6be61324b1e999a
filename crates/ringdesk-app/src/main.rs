mod app_state;
mod cli;
mod instance;
mod provider;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use ringdesk_config::RingdeskConfig;

use app_state::{LaunchOptions, RingdeskApp};
use instance::Instance;

const DEFAULT_DIRECTIVE: &str = "ringdesk=info";

/// `DEBUG=1` in the environment turns on the web inspector.
fn debug_env() -> bool {
    std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
}

fn main() {
    let args = cli::parse();

    // Config is read before logging starts so its level can apply; any
    // failure is reported once the subscriber is up.
    let loaded = match args.config {
        Some(ref path) => ringdesk_config::load_config_from(Path::new(path)),
        None => ringdesk_config::load_config(),
    };

    let level_directive = match (&args.log_level, &loaded) {
        (Some(level), _) => format!("ringdesk={level}"),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                level_directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_DIRECTIVE.parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("ringdesk v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        RingdeskConfig::default()
    });
    tracing::debug!("Effective config: {}", ringdesk_config::config_to_json(&config));

    let launch = LaunchOptions {
        url: args.url.clone().unwrap_or_else(|| config.app.url.clone()),
        devtools: args.debug || config.app.devtools || debug_env(),
    };
    tracing::info!(url = %launch.url, devtools = launch.devtools, "Launch options resolved");

    let instance = match instance::acquire(&instance::socket_path()) {
        Ok(Instance::Primary(guard)) => Some(guard),
        Ok(Instance::Secondary) => {
            tracing::info!("Handed off to the running instance, exiting");
            return;
        }
        Err(e) => {
            tracing::warn!("Single-instance guard unavailable: {e}");
            None
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = RingdeskApp::new(config, launch, instance);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
