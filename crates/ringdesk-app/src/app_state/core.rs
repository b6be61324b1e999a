//! RingdeskApp struct definition and constructor.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use ringdesk_config::RingdeskConfig;
use ringdesk_webview::{Delivery, Gateway};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::instance::InstanceGuard;
use crate::provider::{EventSink, WryProvider};

/// Resolved from the command line and config before the loop starts.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// URL loaded in the main window.
    pub url: String,
    pub devtools: bool,
}

/// Top-level application state.
pub struct RingdeskApp {
    pub(super) config: RingdeskConfig,
    pub(super) launch: LaunchOptions,

    // Filled by wry callbacks, drained on every poll
    pub(super) events: EventSink,

    // Built on `resumed`
    pub(super) gateway: Option<Gateway<WryProvider>>,
    pub(super) deliveries: Option<UnboundedReceiver<Delivery>>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Single-instance socket, and the flag a second launch sets
    pub(super) instance: Option<InstanceGuard>,
    pub(super) raise_requested: Arc<AtomicBool>,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl RingdeskApp {
    pub fn new(
        config: RingdeskConfig,
        launch: LaunchOptions,
        instance: Option<InstanceGuard>,
    ) -> Self {
        Self {
            config,
            launch,
            events: Arc::new(Mutex::new(Vec::new())),
            gateway: None,
            deliveries: None,
            tokio_runtime: None,
            instance,
            raise_requested: Arc::new(AtomicBool::new(false)),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
