use std::collections::HashMap;
use std::future::Future;

use ringdesk_common::{PlatformError, SurfaceKey};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::detect::SelectionStrategy;
use super::picker::{overlay_script, teardown_script};
use super::source::{
    CaptureError, CaptureSource, MediaConstraint, ScreenSourceRequest, SourceKind,
};

/// What the user did with the picker overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Selected(String),
    Cancelled,
}

/// Tracks open picker overlays and hands out capture sessions.
///
/// Lives on the control thread next to the gateway. Sessions run on the
/// async runtime and learn about the user's choice through a oneshot
/// channel keyed by the requesting surface and request id.
pub struct ScreenSourceBroker {
    strategy: SelectionStrategy,
    pickers: HashMap<(SurfaceKey, u64), oneshot::Sender<PickerOutcome>>,
}

impl ScreenSourceBroker {
    pub fn new(strategy: SelectionStrategy) -> Self {
        Self {
            strategy,
            pickers: HashMap::new(),
        }
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Start a capture for one `GET_SCREEN_SOURCE` request.
    pub fn begin(
        &mut self,
        surface: SurfaceKey,
        request_id: u64,
        request: &ScreenSourceRequest,
    ) -> CaptureSession {
        // Sessions that already finished leave a closed sender behind.
        self.pickers.retain(|_, tx| !tx.is_closed());

        let mode = match self.strategy {
            SelectionStrategy::AutoSelect => SessionMode::Auto,
            SelectionStrategy::ManualPicker => {
                let (tx, rx) = oneshot::channel();
                if self.pickers.insert((surface, request_id), tx).is_some() {
                    warn!(%surface, request_id, "replacing picker for duplicate request id");
                }
                SessionMode::Manual(rx)
            }
        };

        debug!(%surface, request_id, strategy = ?self.strategy, "capture session started");

        CaptureSession {
            surface,
            request_id,
            kinds: match self.strategy {
                SelectionStrategy::AutoSelect => vec![SourceKind::Screen],
                SelectionStrategy::ManualPicker => request.kinds(),
            },
            max_width: request.max_width(),
            max_height: request.max_height(),
            mode,
        }
    }

    /// Deliver the user's choice to a waiting session. Returns false when
    /// no picker is open under that key.
    pub fn resolve(&mut self, surface: SurfaceKey, request_id: u64, outcome: PickerOutcome) -> bool {
        match self.pickers.remove(&(surface, request_id)) {
            Some(tx) => tx.send(outcome).is_ok(),
            None => {
                debug!(%surface, request_id, "no open picker for request");
                false
            }
        }
    }

    /// Cancel every picker open in a surface that went away.
    pub fn abandon_surface(&mut self, surface: SurfaceKey) -> usize {
        let before = self.pickers.len();
        self.pickers.retain(|(s, _), _| *s != surface);
        before - self.pickers.len()
    }

    /// Number of pickers still waiting for the user.
    pub fn pending(&self) -> usize {
        self.pickers.values().filter(|tx| !tx.is_closed()).count()
    }
}

enum SessionMode {
    Auto,
    Manual(oneshot::Receiver<PickerOutcome>),
}

/// One in-flight capture request.
pub struct CaptureSession {
    surface: SurfaceKey,
    request_id: u64,
    kinds: Vec<SourceKind>,
    max_width: Option<f64>,
    max_height: Option<f64>,
    mode: SessionMode,
}

impl CaptureSession {
    pub fn surface(&self) -> SurfaceKey {
        self.surface
    }

    /// Source kinds to enumerate for this session.
    pub fn kinds(&self) -> &[SourceKind] {
        &self.kinds
    }

    /// Wait for enumeration, pick a source, and build the constraint.
    ///
    /// `inject` receives the overlay and teardown scripts for the
    /// requesting surface. The overlay is always removed before this
    /// returns, whichever way the picker ends.
    pub async fn run<E, S>(self, enumeration: E, inject: S) -> Result<MediaConstraint, CaptureError>
    where
        E: Future<Output = Result<Vec<CaptureSource>, PlatformError>>,
        S: Fn(String),
    {
        let sources = enumeration
            .await
            .map_err(|e| CaptureError::Enumeration(e.to_string()))?;

        debug!(
            surface = %self.surface,
            request_id = self.request_id,
            count = sources.len(),
            "capture sources enumerated"
        );

        match self.mode {
            SessionMode::Auto => {
                let screen = sources
                    .iter()
                    .find(|s| s.kind == SourceKind::Screen)
                    .ok_or(CaptureError::NoScreen)?;
                Ok(MediaConstraint::desktop(
                    &screen.id,
                    self.max_width,
                    self.max_height,
                ))
            }
            SessionMode::Manual(rx) => {
                if sources.is_empty() {
                    return Err(CaptureError::NoScreen);
                }

                inject(overlay_script(self.request_id, &sources));
                // A dropped sender means the picker was abandoned.
                let outcome = rx.await.unwrap_or(PickerOutcome::Cancelled);
                inject(teardown_script(self.request_id));

                match outcome {
                    PickerOutcome::Cancelled => Err(CaptureError::Cancelled),
                    PickerOutcome::Selected(id) => sources
                        .iter()
                        .find(|s| s.id == id)
                        .map(|s| MediaConstraint::desktop(&s.id, self.max_width, self.max_height))
                        .ok_or(CaptureError::UnknownSource(id)),
                }
            }
        }
    }
}
