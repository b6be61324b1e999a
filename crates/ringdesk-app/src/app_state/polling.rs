//! Drains surface events and outbox deliveries on the control thread.

use std::sync::atomic::Ordering;
use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use ringdesk_webview::{SurfaceEvent, SurfaceProvider};

use super::core::RingdeskApp;
use super::types::POLL_INTERVAL;

impl RingdeskApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_surface_events();
            self.realize_pending(event_loop);
            self.poll_deliveries();
            self.poll_raise_request();
            self.check_main_window();
        }

        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Feed everything the webviews reported since the last tick into the
    /// gateway, in arrival order.
    fn poll_surface_events(&mut self) {
        let events: Vec<SurfaceEvent> = match self.events.lock() {
            Ok(mut evts) => std::mem::take(&mut *evts),
            Err(_) => return,
        };
        let Some(ref mut gateway) = self.gateway else {
            return;
        };

        for event in events {
            if let SurfaceEvent::TitleChanged { surface, ref title } = event {
                gateway.provider_mut().set_title(surface, title);
            }
            gateway.handle_event(event);
        }
    }

    /// Build windows the gateway asked for since the last tick.
    fn realize_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ref mut gateway) = self.gateway else {
            return;
        };
        if let Err(e) = gateway.provider_mut().realize(event_loop) {
            tracing::error!("Failed to build main window: {e}");
            self.should_exit = true;
        }
    }

    /// Run queued replies and scripts in their surfaces.
    fn poll_deliveries(&mut self) {
        let (Some(gateway), Some(rx)) = (self.gateway.as_mut(), self.deliveries.as_mut()) else {
            return;
        };
        while let Ok(delivery) = rx.try_recv() {
            gateway.deliver(delivery);
        }
    }

    /// A second launch asked for the main window: restore and focus it.
    fn poll_raise_request(&mut self) {
        if !self.raise_requested.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(ref mut gateway) = self.gateway {
            let root = gateway.provider().root();
            if let Err(e) = gateway.provider_mut().focus(root) {
                tracing::warn!("Failed to raise main window: {e}");
            }
        }
    }

    /// The app lives as long as its main window.
    fn check_main_window(&mut self) {
        if let Some(ref gateway) = self.gateway {
            let provider = gateway.provider();
            if !provider.is_open(provider.root()) {
                tracing::info!("Main window gone, exiting");
                self.should_exit = true;
            }
        }
    }
}
