//! Screen-source brokering for `getDisplayMedia`.
//!
//! A capture request enumerates screens and windows through the surface
//! provider, then either passes the first screen straight through (the
//! compositor has its own picker) or shows an in-page overlay and waits
//! for the user.

mod broker;
mod detect;
mod picker;
mod source;

pub use broker::{CaptureSession, PickerOutcome, ScreenSourceBroker};
pub use detect::SelectionStrategy;
pub use picker::{escape_html, overlay_script, teardown_script};
pub use source::{
    CaptureError, CaptureSource, Dimension, MediaConstraint, ScreenSourceRequest, SourceKind,
    VideoConstraints,
};
