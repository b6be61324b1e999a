//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the tokio runtime, the capability gateway and the
//! surfaces it manages.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use core::{LaunchOptions, RingdeskApp};
