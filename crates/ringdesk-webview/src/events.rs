//! Events raised by surfaces and fed into the gateway on the control thread.

use ringdesk_common::SurfaceKey;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Content posted a message on the IPC channel.
    IpcMessage { surface: SurfaceKey, body: String },
    /// Content tried to open a new top-level target (`target=_blank`,
    /// `window.open`). The host has already cancelled its own window.
    NewWindowRequested {
        opener: SurfaceKey,
        url: String,
        frame_name: Option<String>,
    },
    /// A child surface was stopped from navigating to a URL that must
    /// leave the shell.
    ExternalNavigation { surface: SurfaceKey, url: String },
    TitleChanged { surface: SurfaceKey, title: String },
    FocusChanged { surface: SurfaceKey, focused: bool },
    /// The surface is gone. Fired once per surface.
    Closed { surface: SurfaceKey },
}

impl SurfaceEvent {
    pub fn surface(&self) -> SurfaceKey {
        match self {
            Self::IpcMessage { surface, .. }
            | Self::ExternalNavigation { surface, .. }
            | Self::TitleChanged { surface, .. }
            | Self::FocusChanged { surface, .. }
            | Self::Closed { surface } => *surface,
            Self::NewWindowRequested { opener, .. } => *opener,
        }
    }
}
