//! The windowing host, seen from the bridge.
//!
//! The gateway never touches windows directly. Everything it needs from
//! the host goes through [`SurfaceProvider`], which the app implements on
//! top of winit + wry and tests implement with a recording fake.

use futures_util::future::BoxFuture;
use ringdesk_common::{Color, Parent, PlatformError, Rect, SurfaceKey};

use crate::capture::{CaptureSource, SourceKind};

/// Options for a new surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub parent: Parent,
    /// Window title until the page sets its own.
    pub title: String,
    /// Stop navigations that must leave the shell and report them as
    /// `SurfaceEvent::ExternalNavigation`.
    pub guard_navigation: bool,
}

impl SurfaceOptions {
    /// A child window owned by the root surface.
    pub fn child() -> Self {
        Self {
            parent: Parent::Child,
            title: String::new(),
            guard_navigation: true,
        }
    }
}

pub trait SurfaceProvider {
    /// Create an empty surface. Creation may finish later; the key is
    /// valid immediately.
    fn create_surface(&mut self, options: &SurfaceOptions) -> Result<SurfaceKey, PlatformError>;

    /// The root window hosting the app.
    fn root(&self) -> SurfaceKey;

    /// Start loading `url` in the surface.
    fn load_url(&mut self, surface: SurfaceKey, url: &str) -> Result<(), PlatformError>;
    fn show(&mut self, surface: SurfaceKey) -> Result<(), PlatformError>;

    /// Ask the surface to close. The host reports `SurfaceEvent::Closed`
    /// once it is gone.
    fn close(&mut self, surface: SurfaceKey) -> Result<(), PlatformError>;

    /// Tear the surface down immediately. Also reported as `Closed`.
    fn destroy(&mut self, surface: SurfaceKey) -> Result<(), PlatformError>;

    fn remove_menu(&mut self, surface: SurfaceKey) -> Result<(), PlatformError>;

    /// Raise, restore if minimized, and focus.
    fn focus(&mut self, surface: SurfaceKey) -> Result<(), PlatformError>;
    fn is_focused(&self, surface: SurfaceKey) -> bool;
    fn is_minimized(&self, surface: SurfaceKey) -> bool;

    fn set_background_color(&mut self, surface: SurfaceKey, color: Color)
        -> Result<(), PlatformError>;

    /// Outer window bounds.
    fn bounds(&self, surface: SurfaceKey) -> Result<Rect, PlatformError>;
    /// Bounds of the web content area.
    fn content_bounds(&self, surface: SurfaceKey) -> Result<Rect, PlatformError>;
    fn set_bounds(&mut self, surface: SurfaceKey, bounds: Rect) -> Result<(), PlatformError>;

    /// Flush cookies and web storage to disk.
    fn flush_storage(&mut self) -> Result<(), PlatformError>;

    fn evaluate_script(&mut self, surface: SurfaceKey, script: &str) -> Result<(), PlatformError>;

    fn set_badge_count(&mut self, count: u32) -> Result<(), PlatformError>;

    /// Hand a URL to the OS default handler.
    fn open_external(&mut self, url: &str) -> Result<(), PlatformError>;

    /// Enumerate capture sources of the given kinds. The returned future
    /// owns everything it needs so it can run off the control thread.
    fn capture_sources(
        &self,
        kinds: &[SourceKind],
    ) -> BoxFuture<'static, Result<Vec<CaptureSource>, PlatformError>>;
}
