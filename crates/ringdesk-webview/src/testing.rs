//! Recording `SurfaceProvider` for tests.

use std::collections::BTreeMap;

use futures_util::future::{self, BoxFuture, FutureExt};
use ringdesk_common::{Color, Parent, PlatformError, Rect, SurfaceKey};

use crate::capture::{CaptureSource, SourceKind};
use crate::provider::{SurfaceOptions, SurfaceProvider};

#[derive(Debug, Clone)]
pub(crate) struct FakeSurface {
    pub url: String,
    pub parent: Parent,
    pub visible: bool,
    pub minimized: bool,
    pub has_menu: bool,
    pub bounds: Rect,
    pub background: Option<Color>,
}

pub(crate) struct FakeProvider {
    root: SurfaceKey,
    next_key: u64,
    surfaces: BTreeMap<SurfaceKey, FakeSurface>,
    focused: Option<SurfaceKey>,
    closed: Vec<SurfaceKey>,
    /// Human-readable log of mutating calls, in order.
    pub calls: Vec<String>,
    pub external: Vec<String>,
    pub scripts: Vec<(SurfaceKey, String)>,
    pub badge: Vec<u32>,
    pub flushes: usize,
    pub fail_create: bool,
    pub fail_load: bool,
    pub sources: Result<Vec<CaptureSource>, String>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let root = SurfaceKey(1);
        let mut surfaces = BTreeMap::new();
        surfaces.insert(
            root,
            FakeSurface {
                url: "https://app.ringcentral.com".into(),
                parent: Parent::Root,
                visible: true,
                minimized: false,
                has_menu: true,
                bounds: Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 1200.0,
                    height: 800.0,
                },
                background: None,
            },
        );
        Self {
            root,
            next_key: 2,
            surfaces,
            focused: Some(root),
            closed: Vec::new(),
            calls: Vec::new(),
            external: Vec::new(),
            scripts: Vec::new(),
            badge: Vec::new(),
            flushes: 0,
            fail_create: false,
            fail_load: false,
            sources: Ok(Vec::new()),
        }
    }

    pub fn surface(&self, key: SurfaceKey) -> Option<&FakeSurface> {
        self.surfaces.get(&key)
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn url_of(&self, key: SurfaceKey) -> Option<String> {
        self.surfaces.get(&key).map(|s| s.url.clone())
    }

    pub fn is_visible(&self, key: SurfaceKey) -> bool {
        self.surfaces.get(&key).is_some_and(|s| s.visible)
    }

    pub fn focused(&self) -> Option<SurfaceKey> {
        self.focused
    }

    pub fn set_minimized(&mut self, key: SurfaceKey, minimized: bool) {
        if let Some(s) = self.surfaces.get_mut(&key) {
            s.minimized = minimized;
        }
    }

    /// Surfaces closed since the last call; feed these back as
    /// `SurfaceEvent::Closed` the way the host would.
    pub fn take_closed(&mut self) -> Vec<SurfaceKey> {
        std::mem::take(&mut self.closed)
    }

    fn live(&mut self, key: SurfaceKey) -> Result<&mut FakeSurface, PlatformError> {
        self.surfaces
            .get_mut(&key)
            .ok_or(PlatformError::UnknownSurface(key.0))
    }

    fn teardown(&mut self, key: SurfaceKey) -> Result<(), PlatformError> {
        self.surfaces
            .remove(&key)
            .ok_or(PlatformError::UnknownSurface(key.0))?;
        if self.focused == Some(key) {
            self.focused = None;
        }
        self.closed.push(key);
        Ok(())
    }
}

impl SurfaceProvider for FakeProvider {
    fn create_surface(&mut self, options: &SurfaceOptions) -> Result<SurfaceKey, PlatformError> {
        if self.fail_create {
            return Err(PlatformError::Surface("creation refused".into()));
        }
        let key = SurfaceKey(self.next_key);
        self.next_key += 1;
        self.surfaces.insert(
            key,
            FakeSurface {
                url: String::new(),
                parent: options.parent,
                visible: false,
                minimized: false,
                has_menu: true,
                bounds: Rect {
                    x: 10.0,
                    y: 20.0,
                    width: 800.0,
                    height: 600.0,
                },
                background: None,
            },
        );
        self.calls.push(format!("create {key}"));
        Ok(key)
    }

    fn root(&self) -> SurfaceKey {
        self.root
    }

    fn load_url(&mut self, surface: SurfaceKey, url: &str) -> Result<(), PlatformError> {
        if self.fail_load {
            return Err(PlatformError::Surface("load refused".into()));
        }
        self.live(surface)?.url = url.to_string();
        self.calls.push(format!("load {surface}"));
        Ok(())
    }

    fn show(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.live(surface)?.visible = true;
        self.calls.push(format!("show {surface}"));
        Ok(())
    }

    fn close(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.teardown(surface)?;
        self.calls.push(format!("close {surface}"));
        Ok(())
    }

    fn destroy(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.teardown(surface)?;
        self.calls.push(format!("destroy {surface}"));
        Ok(())
    }

    fn remove_menu(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.live(surface)?.has_menu = false;
        self.calls.push(format!("remove_menu {surface}"));
        Ok(())
    }

    fn focus(&mut self, surface: SurfaceKey) -> Result<(), PlatformError> {
        self.live(surface)?.minimized = false;
        self.focused = Some(surface);
        self.calls.push(format!("focus {surface}"));
        Ok(())
    }

    fn is_focused(&self, surface: SurfaceKey) -> bool {
        self.focused == Some(surface)
    }

    fn is_minimized(&self, surface: SurfaceKey) -> bool {
        self.surfaces.get(&surface).is_some_and(|s| s.minimized)
    }

    fn set_background_color(
        &mut self,
        surface: SurfaceKey,
        color: Color,
    ) -> Result<(), PlatformError> {
        self.live(surface)?.background = Some(color);
        self.calls.push(format!("background {surface}"));
        Ok(())
    }

    fn bounds(&self, surface: SurfaceKey) -> Result<Rect, PlatformError> {
        self.surfaces
            .get(&surface)
            .map(|s| s.bounds)
            .ok_or(PlatformError::UnknownSurface(surface.0))
    }

    fn content_bounds(&self, surface: SurfaceKey) -> Result<Rect, PlatformError> {
        // No decorations in the fake: content sits at the origin.
        self.bounds(surface).map(|b| Rect {
            x: 0.0,
            y: 0.0,
            ..b
        })
    }

    fn set_bounds(&mut self, surface: SurfaceKey, bounds: Rect) -> Result<(), PlatformError> {
        self.live(surface)?.bounds = bounds;
        self.calls.push(format!("set_bounds {surface}"));
        Ok(())
    }

    fn flush_storage(&mut self) -> Result<(), PlatformError> {
        self.flushes += 1;
        Ok(())
    }

    fn evaluate_script(&mut self, surface: SurfaceKey, script: &str) -> Result<(), PlatformError> {
        self.live(surface)?;
        self.scripts.push((surface, script.to_string()));
        Ok(())
    }

    fn set_badge_count(&mut self, count: u32) -> Result<(), PlatformError> {
        self.badge.push(count);
        Ok(())
    }

    fn open_external(&mut self, url: &str) -> Result<(), PlatformError> {
        self.external.push(url.to_string());
        Ok(())
    }

    fn capture_sources(
        &self,
        kinds: &[SourceKind],
    ) -> BoxFuture<'static, Result<Vec<CaptureSource>, PlatformError>> {
        let result = self
            .sources
            .clone()
            .map(|all| {
                all.into_iter()
                    .filter(|s| kinds.contains(&s.kind))
                    .collect()
            })
            .map_err(PlatformError::Capture);
        future::ready(result).boxed()
    }
}
