//! Internal constants for the app state module.

use std::time::Duration;

/// How often surface events and outbox deliveries are drained (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// How long background capture tasks get to finish on exit.
pub(super) const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
