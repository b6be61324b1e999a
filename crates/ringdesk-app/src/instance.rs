//! Single-instance guard.
//!
//! The first process binds a Unix socket and listens on it. A later launch
//! connects, asks the first one to raise its main window, and exits.

use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use ringdesk_common::Result;

const SOCKET_NAME: &str = "ringdesk.sock";

/// Sent by a second launch.
#[cfg(unix)]
const FOCUS_REQUEST: &[u8] = b"focus";

/// Where the running instance listens.
pub fn socket_path() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("ringdesk")
        .join(SOCKET_NAME)
}

#[cfg(unix)]
fn is_focus_request(bytes: &[u8]) -> bool {
    bytes.trim_ascii() == FOCUS_REQUEST
}

pub enum Instance {
    /// This process owns the socket.
    Primary(InstanceGuard),
    /// Another instance was told to come forward; this one should exit.
    Secondary,
}

/// Holds the socket for the life of the app and removes it on drop.
pub struct InstanceGuard {
    #[cfg(unix)]
    listener: Option<std::os::unix::net::UnixListener>,
    path: PathBuf,
}

// =============================================================================
// UNIX
// =============================================================================

#[cfg(unix)]
pub fn acquire(path: &Path) -> Result<Instance> {
    use std::io::Write;
    use std::os::unix::net::{UnixListener, UnixStream};

    if let Ok(mut stream) = UnixStream::connect(path) {
        stream.write_all(FOCUS_REQUEST)?;
        tracing::info!(path = %path.display(), "ringdesk is already running");
        return Ok(Instance::Secondary);
    }

    // Nobody answered, so whatever is left at the path is from a dead run.
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let listener = UnixListener::bind(path)?;
    tracing::debug!(path = %path.display(), "instance socket bound");

    Ok(Instance::Primary(InstanceGuard {
        listener: Some(listener),
        path: path.to_path_buf(),
    }))
}

#[cfg(unix)]
impl InstanceGuard {
    /// Accept focus requests on `runtime`, raising `raise` for each one.
    pub fn listen(&mut self, runtime: &tokio::runtime::Handle, raise: Arc<AtomicBool>) -> Result<()> {
        use tokio::io::AsyncReadExt;

        let Some(listener) = self.listener.take() else {
            return Ok(());
        };
        listener.set_nonblocking(true)?;
        let listener = {
            let _enter = runtime.enter();
            tokio::net::UnixListener::from_std(listener)?
        };

        runtime.spawn(async move {
            loop {
                let mut stream = match listener.accept().await {
                    Ok((stream, _)) => stream,
                    Err(e) => {
                        tracing::warn!("Instance socket accept failed: {e}");
                        continue;
                    }
                };
                let mut buf = [0u8; 16];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                if is_focus_request(&buf[..n]) {
                    tracing::info!("Second launch asked for the main window");
                    raise.store(true, Ordering::SeqCst);
                }
            }
        });
        Ok(())
    }
}

// =============================================================================
// OTHER PLATFORMS
// =============================================================================

#[cfg(not(unix))]
pub fn acquire(path: &Path) -> Result<Instance> {
    tracing::debug!("single-instance guard unavailable on this platform");
    Ok(Instance::Primary(InstanceGuard {
        path: path.to_path_buf(),
    }))
}

#[cfg(not(unix))]
impl InstanceGuard {
    pub fn listen(&mut self, _runtime: &tokio::runtime::Handle, _raise: Arc<AtomicBool>) -> Result<()> {
        Ok(())
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

// =============================================================================
// TESTS
// =============================================================================
