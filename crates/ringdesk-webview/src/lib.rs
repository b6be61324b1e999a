//! Native bridge between embedded web content and the desktop shell.
//!
//! Provides:
//! - Typed request/acknowledge/response envelopes over a single IPC channel
//! - A registry of live child windows addressed by opaque string ids
//! - The capability gateway that dispatches content requests to native code
//! - Child window lifecycle and link routing (in-app vs. system browser)
//! - Screen-source brokering for screen sharing
//!
//! The windowing host itself is abstracted behind [`SurfaceProvider`].

pub mod badge;
pub mod capture;
pub mod events;
pub mod gateway;
pub mod ipc;
pub mod manager;
pub mod provider;
pub mod system;
pub mod user_agent;

#[cfg(test)]
pub(crate) mod testing;

pub use capture::{CaptureSource, ScreenSourceBroker, SelectionStrategy, SourceKind};
pub use events::SurfaceEvent;
pub use gateway::{Delivery, Gateway, GatewayOptions};
pub use ipc::{Capability, Inbound, ResponseEnvelope};
pub use manager::{LinkPolicy, SurfaceLifecycle, WindowHandle, WindowRegistry};
pub use provider::{SurfaceOptions, SurfaceProvider};
pub use system::{default_sampler, CpuSampler};
