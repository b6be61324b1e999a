//! Capability gateway: the single entry point for content-originated
//! messages.
//!
//! Every request is acknowledged with RECEIVED before any work happens and
//! answered with exactly one RESPONSE. Replies and injected scripts go
//! through one FIFO outbox which the host drains on the control thread and
//! evaluates in the target surface.

use ringdesk_common::SurfaceKey;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::badge::unread_from_title;
use crate::capture::{ScreenSourceBroker, SelectionStrategy};
use crate::events::SurfaceEvent;
use crate::ipc::{invalid_body, Inbound, Notification};
use crate::manager::{LinkPolicy, SurfaceLifecycle, WindowRegistry};
use crate::provider::SurfaceProvider;
use crate::system::{default_sampler, CpuSampler};

mod handlers;
mod outbox;

pub use outbox::{Delivery, Outbox, PendingReply, Reply};

/// Knobs fixed at startup.
pub struct GatewayOptions {
    pub links: LinkPolicy,
    pub selection: SelectionStrategy,
    pub cpu: Box<dyn CpuSampler>,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            links: LinkPolicy::default(),
            selection: SelectionStrategy::from_env(),
            cpu: default_sampler(),
        }
    }
}

pub struct Gateway<P: SurfaceProvider> {
    provider: P,
    registry: WindowRegistry,
    lifecycle: SurfaceLifecycle,
    broker: ScreenSourceBroker,
    cpu: Box<dyn CpuSampler>,
    outbox: Outbox,
    runtime: Handle,
    /// Last count pushed to the provider.
    badge: Option<u32>,
}

impl<P: SurfaceProvider> Gateway<P> {
    /// Build a gateway and the receiving end of its outbox.
    ///
    /// Capture sessions are spawned on `runtime`.
    pub fn new(
        provider: P,
        options: GatewayOptions,
        runtime: Handle,
    ) -> (Self, UnboundedReceiver<Delivery>) {
        let (outbox, rx) = Outbox::channel();
        info!(selection = ?options.selection, "capability gateway ready");
        let gateway = Self {
            provider,
            registry: WindowRegistry::new(),
            lifecycle: SurfaceLifecycle::new(options.links),
            broker: ScreenSourceBroker::new(options.selection),
            cpu: options.cpu,
            outbox,
            runtime,
            badge: None,
        };
        (gateway, rx)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn broker(&self) -> &ScreenSourceBroker {
        &self.broker
    }

    /// A raw IPC body posted by `origin`.
    pub fn handle_ipc(&mut self, origin: SurfaceKey, raw: &str) {
        match Inbound::from_json(raw) {
            Ok(Inbound::Request(request)) => self.handle_request(origin, request),
            Ok(Inbound::Notification(Notification::BadgeCount(count))) => self.set_badge(count),
            Ok(Inbound::Invalid { id, event, reason }) => {
                warn!(surface = %origin, id, event = %event, reason = %reason, "rejecting request body");
                Reply::new(self.outbox.clone(), origin, event, id)
                    .acknowledge()
                    .respond(Some(invalid_body(&reason)));
            }
            Ok(Inbound::Unknown { event }) => {
                debug!(surface = %origin, event = %event, "ignoring unknown event");
            }
            Err(e) => {
                warn!(surface = %origin, error = %e, "dropping malformed IPC message");
            }
        }
    }

    /// Anything the host reports about its surfaces.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::IpcMessage { surface, body } => self.handle_ipc(surface, &body),
            SurfaceEvent::NewWindowRequested {
                opener,
                url,
                frame_name,
            } => {
                self.lifecycle.handle_new_window(
                    &mut self.provider,
                    &mut self.registry,
                    opener,
                    &url,
                    frame_name.as_deref(),
                );
            }
            SurfaceEvent::ExternalNavigation { surface, url } => {
                self.lifecycle
                    .handle_external_navigation(&mut self.provider, surface, &url);
            }
            SurfaceEvent::TitleChanged { surface, title } => {
                if surface == self.provider.root() {
                    self.set_badge(unread_from_title(&title));
                }
            }
            SurfaceEvent::FocusChanged { surface, focused } => {
                self.lifecycle
                    .handle_focus_changed(&mut self.registry, surface, focused);
            }
            SurfaceEvent::Closed { surface } => {
                let ids = self.lifecycle.handle_closed(&mut self.registry, surface);
                let pickers = self.broker.abandon_surface(surface);
                debug!(%surface, ?ids, pickers, "surface closed");
            }
        }
    }

    /// Run one queued delivery in its surface.
    pub fn deliver(&mut self, delivery: Delivery) {
        let surface = delivery.surface();
        if let Err(e) = self
            .provider
            .evaluate_script(surface, &delivery.to_script())
        {
            // The surface may have closed while the reply was queued.
            debug!(%surface, error = %e, "delivery failed");
        }
    }

    fn set_badge(&mut self, count: u32) {
        if self.badge == Some(count) {
            return;
        }
        match self.provider.set_badge_count(count) {
            Ok(()) => {
                debug!(count, "badge updated");
                self.badge = Some(count);
            }
            Err(e) => warn!(count, error = %e, "failed to set badge"),
        }
    }
}
