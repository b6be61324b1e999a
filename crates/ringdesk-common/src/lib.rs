pub mod errors;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError, PlatformError, RingdeskError};
pub use id::new_window_id;
pub use types::{Color, Parent, Rect, SurfaceKey};

pub type Result<T> = std::result::Result<T, RingdeskError>;
