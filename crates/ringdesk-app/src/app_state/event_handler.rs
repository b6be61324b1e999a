//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use ringdesk_webview::{SurfaceEvent, SurfaceProvider};

use super::core::RingdeskApp;

impl ApplicationHandler for RingdeskApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gateway.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            tracing::error!("Startup failed: {e}");
            self.should_exit = true;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some((surface, is_root)) = self.gateway.as_ref().and_then(|gateway| {
            let provider = gateway.provider();
            provider
                .surface_for_window(window_id)
                .map(|surface| (surface, surface == provider.root()))
        }) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested if is_root => {
                tracing::info!("Main window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::CloseRequested => {
                if let Some(ref mut gateway) = self.gateway {
                    if let Err(e) = gateway.provider_mut().close(surface) {
                        tracing::warn!(%surface, error = %e, "Failed to close window");
                    }
                }
            }

            WindowEvent::Focused(focused) => {
                self.push_event(SurfaceEvent::FocusChanged { surface, focused });
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl RingdeskApp {
    /// Queue an event raised by winit rather than by a webview callback.
    pub(super) fn push_event(&self, event: SurfaceEvent) {
        if let Ok(mut evts) = self.events.lock() {
            evts.push(event);
        }
    }
}
