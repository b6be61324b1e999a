//! Graceful shutdown: flush web storage, close windows, stop the runtime.

use super::core::RingdeskApp;
use super::types::RUNTIME_SHUTDOWN_TIMEOUT;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl RingdeskApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Flush cookies and storage while the webviews still exist
    /// 2. Drop the gateway, closing every window and cancelling open pickers
    /// 3. Shut down the tokio runtime (capture tasks, instance listener)
    /// 4. Release the single-instance socket
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(mut gateway) = self.gateway.take() {
            if let Err(e) = gateway.provider_mut().flush_storage() {
                tracing::warn!("Failed to flush web storage: {e}");
            }
            gateway.provider_mut().close_all();
        }
        self.deliveries = None;

        if let Ok(mut evts) = self.events.lock() {
            evts.clear();
        }

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
        }
        self.instance = None;

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::app_state::core::{LaunchOptions, RingdeskApp};
    use ringdesk_config::RingdeskConfig;
    use ringdesk_webview::SurfaceEvent;
    use ringdesk_common::SurfaceKey;

    fn app() -> RingdeskApp {
        RingdeskApp::new(
            RingdeskConfig::default(),
            LaunchOptions {
                url: "https://app.ringcentral.com".into(),
                devtools: false,
            },
            None,
        )
    }

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = app();
        app.shutdown();

        assert!(app.gateway.is_none());
        assert!(app.deliveries.is_none());
        assert!(app.tokio_runtime.is_none());
        assert!(app.instance.is_none());
        assert!(app.should_exit);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = app();
        app.shutdown();
        app.shutdown();
        assert!(app.gateway.is_none());
    }

    #[test]
    fn shutdown_drops_queued_events() {
        let mut app = app();
        app.push_event(SurfaceEvent::Closed {
            surface: SurfaceKey(2),
        });

        app.shutdown();

        assert!(app.events.lock().unwrap().is_empty());
    }

    #[test]
    fn shutdown_releases_instance_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ringdesk.sock");
        let mut app = app();
        match crate::instance::acquire(&path).unwrap() {
            crate::instance::Instance::Primary(guard) => app.instance = Some(guard),
            crate::instance::Instance::Secondary => panic!("socket already owned"),
        }

        app.shutdown();

        assert!(app.instance.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn shutdown_stops_runtime() {
        let mut app = app();
        app.tokio_runtime = Some(
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap(),
        );

        app.shutdown();

        assert!(app.tokio_runtime.is_none());
    }
}
