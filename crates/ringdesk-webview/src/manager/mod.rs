//! Child window management.
//!
//! `WindowRegistry` maps content-visible ids to live surfaces and
//! `SurfaceLifecycle` opens, routes, and retires them. The registry is owned
//! by the gateway and lent to the lifecycle controller per call.

mod handle;
mod lifecycle;
mod registry;
mod routing;

pub use handle::{Transition, WindowHandle, WindowState};
pub use lifecycle::{CreateOutcome, SurfaceLifecycle};
pub use registry::WindowRegistry;
pub use routing::{LinkOrigin, LinkPolicy, Route};
