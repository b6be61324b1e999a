//! `SurfaceProvider` on top of winit windows and wry webviews.
//!
//! The gateway runs inside winit callbacks but windows can only be built
//! with an `ActiveEventLoop` in hand, so `create_surface` hands out a key
//! immediately and parks the request as a pending slot. `realize` builds
//! every pending slot on the next loop turn.

use std::collections::HashMap;

use futures_util::future::{self, BoxFuture, FutureExt};
use ringdesk_common::{Color, Parent, PlatformError, Rect, SurfaceKey};
use ringdesk_webview::capture::{CaptureSource, SourceKind};
use ringdesk_webview::ipc::IPC_INIT_SCRIPT;
use ringdesk_webview::{LinkPolicy, SurfaceEvent, SurfaceOptions, SurfaceProvider};
use tracing::{debug, info, warn};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};
use wry::{WebView, WebViewBuilder};

mod capture;
mod handlers;
mod surface;

pub use handlers::EventSink;

use surface::{LiveSurface, PendingSurface, Slot};

/// Settings shared by every surface.
#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub title: String,
    pub user_agent: Option<String>,
    pub devtools: bool,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub links: LinkPolicy,
}

pub struct WryProvider {
    settings: ShellSettings,
    events: EventSink,
    root: SurfaceKey,
    next_key: u64,
    slots: HashMap<SurfaceKey, Slot>,
    windows: HashMap<WindowId, SurfaceKey>,
    badge: u32,
}

impl WryProvider {
    /// A provider whose root surface will load `url` once realized.
    pub fn new(settings: ShellSettings, events: EventSink, url: &str) -> Self {
        let root = SurfaceKey(1);
        let options = SurfaceOptions {
            parent: Parent::Root,
            title: settings.title.clone(),
            guard_navigation: false,
        };
        let mut main = PendingSurface::new(options);
        main.url = Some(url.to_string());
        let mut slots = HashMap::new();
        slots.insert(root, Slot::Pending(main));
        Self {
            settings,
            events,
            root,
            next_key: root.0 + 1,
            slots,
            windows: HashMap::new(),
            badge: 0,
        }
    }

    pub fn surface_for_window(&self, id: WindowId) -> Option<SurfaceKey> {
        self.windows.get(&id).copied()
    }

    /// Whether `surface` is pending or live.
    pub fn is_open(&self, surface: SurfaceKey) -> bool {
        self.slots.contains_key(&surface)
    }

    /// Build every pending surface. Fails only if the root cannot be built.
    pub fn realize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let pending: Vec<SurfaceKey> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Pending(_)))
            .map(|(key, _)| *key)
            .collect();

        for key in pending {
            let Some(Slot::Pending(request)) = self.slots.remove(&key) else {
                continue;
            };
            match self.build(event_loop, key, &request) {
                Ok(live) => {
                    self.windows.insert(live.window.id(), key);
                    replay(key, &live, request);
                    self.slots.insert(key, Slot::Live(live));
                }
                Err(e) if key == self.root => return Err(e),
                Err(e) => {
                    warn!(surface = %key, error = %e, "failed to build surface");
                    self.notify(SurfaceEvent::Closed { surface: key });
                }
            }
        }
        Ok(())
    }

    /// Mirror the page title onto the window.
    pub fn set_title(&mut self, surface: SurfaceKey, title: &str) {
        if let Some(Slot::Live(live)) = self.slots.get(&surface) {
            let title = if title.trim().is_empty() {
                self.settings.title.as_str()
            } else {
                title
            };
            live.window.set_title(title);
        }
    }

    /// Drop every surface. Used during shutdown.
    pub fn close_all(&mut self) {
        self.windows.clear();
        self.slots.clear();
    }

    fn build(
        &self,
        event_loop: &ActiveEventLoop,
        key: SurfaceKey,
        request: &PendingSurface,
    ) -> Result<LiveSurface, PlatformError> {
        let s = &self.settings;
        let title = if request.options.title.is_empty() {
            s.title.as_str()
        } else {
            request.options.title.as_str()
        };
        let mut attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(s.width as f64, s.height as f64))
            .with_min_inner_size(LogicalSize::new(s.min_width as f64, s.min_height as f64))
            .with_visible(request.visible);
        if let Some(b) = request.bounds {
            attrs = attrs
                .with_position(LogicalPosition::new(b.x, b.y))
                .with_inner_size(LogicalSize::new(b.width, b.height));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        let webview = self
            .build_webview(key, &window, request)
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        info!(surface = %key, parent = ?request.options.parent, url = ?request.url, "surface built");
        Ok(LiveSurface { webview, window })
    }

    fn build_webview(
        &self,
        key: SurfaceKey,
        window: &Window,
        request: &PendingSurface,
    ) -> Result<WebView, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_devtools(self.settings.devtools)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(url) = &request.url {
            builder = builder.with_url(url.as_str());
        }
        if let Some(ua) = &self.settings.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_ipc_handler(builder, self.events.clone(), key);
        builder = handlers::attach_title_handler(builder, self.events.clone(), key);
        builder = handlers::attach_new_window_handler(builder, self.events.clone(), key);
        if request.options.guard_navigation {
            builder = handlers::attach_navigation_guard(
                builder,
                self.events.clone(),
                key,
                self.settings.links.clone(),
            );
        }

        builder.build(window)
    }

    fn notify(&self, event: SurfaceEvent) {
        if let Ok(mut evts) = self.events.lock() {
            evts.push(event);
        }
    }

    fn slot(&self, surface: SurfaceKey) -> Result<&Slot, PlatformError> {
        self.slots
            .get(&surface)
            .ok_or(PlatformError::UnknownSurface(surface.0))
    }

    fn slot_mut(&mut self, surface: SurfaceKey) -> Result<&mut Slot, PlatformError> {
        self.slots
            .get_mut(&surface)
            .ok_or(PlatformError::UnknownSurface(surface.0))
    }

    fn teardown(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        match self.slots.remove(&surface) {
            Some(Slot::Live(live)) => {
                self.windows.remove(&live.window.id());
            }
            Some(Slot::Pending(_)) => {}
            None => return Err(PlatformError::UnknownSurface(surface.0)),
        }
        debug!(%surface, "surface torn down");
        self.notify(SurfaceEvent::Closed { surface });
        Ok(())
    }
}

/// Apply calls recorded while the surface was pending.
fn replay(key: SurfaceKey, live: &LiveSurface, request: PendingSurface) {
    if let Some(color) = request.background {
        if let Err(e) = live.webview.set_background_color(color.to_tuple()) {
            warn!(surface = %key, error = %e, "failed to apply background color");
        }
    }
    if request.focus {
        live.window.focus_window();
    }
    for script in request.scripts {
        if let Err(e) = live.webview.evaluate_script(&script) {
            warn!(surface = %key, error = %e, "failed to run queued script");
        }
    }
}

fn wry_error(e: wry::Error) -> PlatformError {
    PlatformError::Surface(e.to_string())
}

impl SurfaceProvider for WryProvider {
    fn create_surface(&mut self, options: &SurfaceOptions) -> Result<SurfaceKey, PlatformError> {
        let key = SurfaceKey(self.next_key);
        self.next_key += 1;
        self.slots
            .insert(key, Slot::Pending(PendingSurface::new(options.clone())));
        debug!(surface = %key, parent = ?options.parent, "surface requested");
        Ok(key)
    }

    fn root(&self) -> SurfaceKey {
        self.root
    }

    fn load_url(&mut self, surface: SurfaceKey, url: &str) -> Result<(), PlatformError> {
        match self.slot_mut(surface)? {
            Slot::Pending(p) => {
                p.url = Some(url.to_string());
                Ok(())
            }
            Slot::Live(live) => live.webview.load_url(url).map_err(wry_error),
        }
    }

    fn show(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        match self.slot_mut(surface)? {
            Slot::Pending(p) => p.visible = true,
            Slot::Live(live) => live.window.set_visible(true),
        }
        Ok(())
    }

    fn close(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.teardown(surface)
    }

    fn destroy(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.teardown(surface)
    }

    fn remove_menu(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        // winit windows carry no menu bar of their own.
        self.slot(surface)?;
        Ok(())
    }

    fn focus(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        match self.slot_mut(surface)? {
            Slot::Pending(p) => p.focus = true,
            Slot::Live(live) => {
                live.window.set_minimized(false);
                live.window.focus_window();
            }
        }
        Ok(())
    }

    fn is_focused(&self, surface: SurfaceKey) -> bool {
        matches!(self.slots.get(&surface), Some(Slot::Live(live)) if live.window.has_focus())
    }

    fn is_minimized(&self, surface: SurfaceKey) -> bool {
        match self.slots.get(&surface) {
            Some(Slot::Live(live)) => live.window.is_minimized().unwrap_or(false),
            _ => false,
        }
    }

    fn set_background_color(
        &mut self,
        surface: SurfaceKey,
        color: Color,
    ) -> Result<(), PlatformError> {
        match self.slot_mut(surface)? {
            Slot::Pending(p) => {
                p.background = Some(color);
                Ok(())
            }
            Slot::Live(live) => live
                .webview
                .set_background_color(color.to_tuple())
                .map_err(wry_error),
        }
    }

    fn bounds(&self, surface: SurfaceKey) -> Result<Rect, PlatformError> {
        match self.slot(surface)? {
            Slot::Pending(p) => Ok(p.bounds.unwrap_or(Rect {
                x: 0.0,
                y: 0.0,
                width: self.settings.width as f64,
                height: self.settings.height as f64,
            })),
            Slot::Live(live) => Ok(live.outer_bounds()),
        }
    }

    fn content_bounds(&self, surface: SurfaceKey) -> Result<Rect, PlatformError> {
        match self.slot(surface)? {
            Slot::Pending(_) => self.bounds(surface),
            Slot::Live(live) => Ok(live.inner_bounds()),
        }
    }

    fn set_bounds(&mut self, surface: SurfaceKey, bounds: Rect) -> Result<(), PlatformError> {
        match self.slot_mut(surface)? {
            Slot::Pending(p) => p.bounds = Some(bounds),
            Slot::Live(live) => live.apply_bounds(bounds),
        }
        Ok(())
    }

    fn flush_storage(&mut self) -> Result<(), PlatformError> {
        // The engine persists cookies and storage itself; nothing is
        // buffered on this side.
        debug!("storage flush requested");
        Ok(())
    }

    fn evaluate_script(&mut self, surface: SurfaceKey, script: &str) -> Result<(), PlatformError> {
        match self.slot_mut(surface)? {
            Slot::Pending(p) => {
                p.scripts.push(script.to_string());
                Ok(())
            }
            Slot::Live(live) => live.webview.evaluate_script(script).map_err(wry_error),
        }
    }

    fn set_badge_count(&mut self, count: u32) -> Result<(), PlatformError> {
        // winit has no dock or taskbar badge API; the count is only logged.
        debug!(previous = self.badge, count, "unread badge");
        self.badge = count;
        Ok(())
    }

    fn open_external(&mut self, url: &str) -> Result<(), PlatformError> {
        open::that(url).map_err(|e| PlatformError::ExternalOpen(format!("{url}: {e}")))
    }

    fn capture_sources(
        &self,
        kinds: &[SourceKind],
    ) -> BoxFuture<'static, Result<Vec<CaptureSource>, PlatformError>> {
        let result = match self.slots.get(&self.root) {
            Some(Slot::Live(live)) => {
                let sources = if capture::wants_screens(kinds) {
                    capture::screen_sources(&live.window)
                } else {
                    Vec::new()
                };
                debug!(count = sources.len(), "capture sources listed");
                Ok(sources)
            }
            _ => Err(PlatformError::Capture(
                "main window is not ready to list screens".into(),
            )),
        };
        future::ready(result).boxed()
    }
}
