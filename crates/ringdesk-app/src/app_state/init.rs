//! Runtime, provider and gateway setup.

use winit::event_loop::ActiveEventLoop;

use ringdesk_config::schema::SelectionMode;
use ringdesk_config::RingdeskConfig;
use ringdesk_webview::user_agent::effective_user_agent;
use ringdesk_webview::{default_sampler, Gateway, GatewayOptions, LinkPolicy, SelectionStrategy};

use crate::provider::{ShellSettings, WryProvider};

use super::core::RingdeskApp;

// =============================================================================
// INITIALIZATION
// =============================================================================

impl RingdeskApp {
    /// Start the runtime, build the gateway and realize the main window.
    /// An error means the event loop should exit.
    pub(super) fn initialize(&mut self, event_loop: &ActiveEventLoop) -> ringdesk_common::Result<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("ringdesk-worker")
            .enable_all()
            .build()?;

        if let Some(ref mut guard) = self.instance {
            if let Err(e) = guard.listen(runtime.handle(), self.raise_requested.clone()) {
                tracing::warn!("Single-instance listener unavailable: {e}");
            }
        }

        let settings = shell_settings(&self.config, self.launch.devtools);
        let options = GatewayOptions {
            links: settings.links.clone(),
            selection: selection_strategy(self.config.capture.selection),
            cpu: default_sampler(),
        };
        let provider = WryProvider::new(settings, self.events.clone(), &self.launch.url);
        let (mut gateway, deliveries) = Gateway::new(provider, options, runtime.handle().clone());

        gateway.provider_mut().realize(event_loop)?;

        tracing::info!(url = %self.launch.url, "Main window ready");
        self.gateway = Some(gateway);
        self.deliveries = Some(deliveries);
        self.tokio_runtime = Some(runtime);
        Ok(())
    }
}

// =============================================================================
// CONFIG MAPPING
// =============================================================================

pub(super) fn selection_strategy(mode: SelectionMode) -> SelectionStrategy {
    match mode {
        SelectionMode::Detect => SelectionStrategy::from_env(),
        SelectionMode::Auto => SelectionStrategy::AutoSelect,
        SelectionMode::Manual => SelectionStrategy::ManualPicker,
    }
}

pub(super) fn shell_settings(config: &RingdeskConfig, devtools: bool) -> ShellSettings {
    ShellSettings {
        title: config.app.title.clone(),
        user_agent: effective_user_agent(config.app.user_agent.as_deref()),
        devtools,
        width: config.window.width,
        height: config.window.height,
        min_width: config.window.min_width,
        min_height: config.window.min_height,
        links: LinkPolicy::new(
            config.links.in_app_prefixes.clone(),
            config.links.external_patterns.clone(),
        ),
    }
}

// =============================================================================
// TESTS
// =============================================================================
