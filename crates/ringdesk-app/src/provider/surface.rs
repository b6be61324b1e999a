//! Per-surface state held by the wry provider.

use ringdesk_common::{Color, Parent, Rect};
use ringdesk_webview::SurfaceOptions;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::Window;
use wry::WebView;

/// A surface the gateway asked for but the event loop has not built yet.
///
/// Calls made before the window exists are recorded here and replayed
/// when it is realized.
#[derive(Debug)]
pub struct PendingSurface {
    pub options: SurfaceOptions,
    /// Set by `load_url`; the webview starts blank without one.
    pub url: Option<String>,
    pub visible: bool,
    pub focus: bool,
    pub bounds: Option<Rect>,
    pub background: Option<Color>,
    pub scripts: Vec<String>,
}

impl PendingSurface {
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            visible: options.parent == Parent::Root,
            options,
            url: None,
            focus: false,
            bounds: None,
            background: None,
            scripts: Vec::new(),
        }
    }
}

/// A realized window and the webview filling it.
pub struct LiveSurface {
    // Dropped before the window it is attached to.
    pub webview: WebView,
    pub window: Window,
}

impl LiveSurface {
    pub fn outer_bounds(&self) -> Rect {
        let scale = self.window.scale_factor();
        let position = self
            .window
            .outer_position()
            .map(|p| p.to_logical::<f64>(scale))
            .unwrap_or(LogicalPosition::new(0.0, 0.0));
        let size = self.window.outer_size().to_logical::<f64>(scale);
        Rect {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn inner_bounds(&self) -> Rect {
        let scale = self.window.scale_factor();
        let position = self
            .window
            .inner_position()
            .map(|p| p.to_logical::<f64>(scale))
            .unwrap_or(LogicalPosition::new(0.0, 0.0));
        let size = self.window.inner_size().to_logical::<f64>(scale);
        Rect {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn apply_bounds(&self, bounds: Rect) {
        self.window
            .set_outer_position(LogicalPosition::new(bounds.x, bounds.y));
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(bounds.width, bounds.height));
    }
}

pub enum Slot {
    Pending(PendingSurface),
    Live(LiveSurface),
}
