use ringdesk_common::{Color, PlatformError, Rect, SurfaceKey};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::capture::{CaptureError, PickerOutcome, ScreenSourceRequest};
use crate::ipc::{Capability, Request};
use crate::manager::CreateOutcome;
use crate::provider::SurfaceProvider;
use crate::system::cpu_usage;

use super::outbox::{PendingReply, Reply};
use super::Gateway;

impl<P: SurfaceProvider> Gateway<P> {
    pub(super) fn handle_request(&mut self, origin: SurfaceKey, request: Request) {
        let Request {
            id,
            event,
            capability,
        } = request;

        debug!(surface = %origin, id, event = %event, "request");
        let reply = Reply::new(self.outbox.clone(), origin, event, id).acknowledge();

        let body = match capability {
            Capability::ScreenSources(req) => return self.start_capture(origin, req, reply),
            other => self.dispatch(origin, other),
        };
        reply.respond(body);
    }

    /// Every synchronous capability. Returns the RESPONSE body.
    fn dispatch(&mut self, origin: SurfaceKey, capability: Capability) -> Option<Value> {
        match capability {
            // =================================================================
            // WINDOWS
            // =================================================================
            Capability::CreateWindow(create) => {
                match self.lifecycle.create_explicit(
                    &mut self.provider,
                    &mut self.registry,
                    &create.url,
                    create.options.always_open_in_browser,
                ) {
                    CreateOutcome::Opened(id) => Some(json!(id)),
                    CreateOutcome::OpenedExternally => Some(json!({ "openedExternally": true })),
                    CreateOutcome::Failed => None,
                }
            }
            Capability::CloseWindow { id } => {
                self.with_window(&id, "close", |p, s| p.close(s));
                None
            }
            Capability::DestroyWindow { id } => {
                self.with_window(&id, "destroy", |p, s| p.destroy(s));
                None
            }
            Capability::RemoveMenu { id } => {
                self.with_window(&id, "remove menu", |p, s| p.remove_menu(s));
                None
            }
            Capability::FocusWindow { id } => {
                let target = id
                    .as_deref()
                    .and_then(|id| self.surface_of(id))
                    .unwrap_or_else(|| self.provider.root());
                if let Err(e) = self.provider.focus(target) {
                    warn!(surface = %target, error = %e, "focus failed");
                }
                None
            }
            Capability::FocusedWindowId => self
                .registry
                .find_first(|h| self.provider.is_focused(h.surface))
                .map(|h| json!(h.id)),
            Capability::WindowIds => Some(json!(self.registry.all_ids())),
            Capability::IsRootMinimized => {
                Some(json!(self.provider.is_minimized(self.provider.root())))
            }
            Capability::SetBackgroundColor(req) => {
                match Color::parse(&req.color) {
                    Some(color) => {
                        self.with_window(&req.id, "set background", |p, s| {
                            p.set_background_color(s, color)
                        });
                    }
                    None => warn!(id = %req.id, color = %req.color, "unparseable background color"),
                }
                None
            }
            Capability::GetBounds { id } => self.bounds_of(&id, |p, s| p.bounds(s)),
            Capability::GetContentBounds { id } => {
                self.bounds_of(&id, |p, s| p.content_bounds(s))
            }
            Capability::SetBounds(req) => {
                self.with_window(&req.id, "set bounds", |p, s| p.set_bounds(s, req.bounds));
                None
            }

            // =================================================================
            // SYSTEM
            // =================================================================
            Capability::CheckCompatibility => Some(json!(true)),
            Capability::CpuInfo => Some(json!(self.cpu.info())),
            Capability::CpuUsage => Some(json!(cpu_usage(&self.cpu.times()))),
            Capability::FlushStorage => {
                if let Err(e) = self.provider.flush_storage() {
                    warn!(error = %e, "storage flush failed");
                }
                None
            }
            Capability::PermissionQuery { permission } => {
                debug!(permission = %permission, "permission granted");
                Some(json!("granted"))
            }

            // =================================================================
            // SCREEN PICKER
            // =================================================================
            Capability::PickerSelect(select) => {
                self.broker.resolve(
                    origin,
                    select.request_id,
                    PickerOutcome::Selected(select.source_id),
                );
                None
            }
            Capability::PickerCancel(cancel) => {
                self.broker
                    .resolve(origin, cancel.request_id, PickerOutcome::Cancelled);
                None
            }
            Capability::ScreenSources(_) => None,
        }
    }

    fn surface_of(&self, id: &str) -> Option<SurfaceKey> {
        self.registry.get(id).map(|h| h.surface)
    }

    /// Run `op` on the window registered as `id`. Absent ids are a no-op.
    fn with_window(
        &mut self,
        id: &str,
        action: &str,
        op: impl FnOnce(&mut P, SurfaceKey) -> Result<(), PlatformError>,
    ) {
        let Some(surface) = self.surface_of(id) else {
            debug!(id, action, "no window with that id");
            return;
        };
        if let Err(e) = op(&mut self.provider, surface) {
            warn!(id, %surface, action, error = %e, "window operation failed");
        }
    }

    fn bounds_of(
        &self,
        id: &str,
        query: impl FnOnce(&P, SurfaceKey) -> Result<Rect, PlatformError>,
    ) -> Option<Value> {
        let surface = self.surface_of(id)?;
        match query(&self.provider, surface) {
            Ok(rect) => Some(json!(rect)),
            Err(e) => {
                warn!(id, %surface, error = %e, "bounds query failed");
                None
            }
        }
    }

    /// `GET_SCREEN_SOURCE`: answered from a runtime task once a source is
    /// chosen, so later requests are not held up behind the picker.
    fn start_capture(&mut self, origin: SurfaceKey, request: ScreenSourceRequest, reply: PendingReply) {
        let session = self.broker.begin(origin, reply.id(), &request);
        let enumeration = self.provider.capture_sources(session.kinds());
        let outbox = self.outbox.clone();

        self.runtime.spawn(async move {
            let result = session
                .run(enumeration, |script| outbox.script(origin, script))
                .await;
            let body = match result {
                Ok(constraint) => serde_json::to_value(&constraint).ok(),
                Err(e) => {
                    if e == CaptureError::Cancelled {
                        debug!(surface = %origin, "capture cancelled");
                    } else {
                        warn!(surface = %origin, error = %e, "capture failed");
                    }
                    Some(e.to_body())
                }
            };
            reply.respond(body);
        });
    }
}
