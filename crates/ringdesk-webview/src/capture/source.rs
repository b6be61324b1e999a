//! Capture source descriptors, request constraints, and the resulting
//! media constraint handed back to the page.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Screen,
    Window,
}

/// One selectable screen or window. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSource {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
    /// `data:image/...` URL, if the host could render one.
    pub thumbnail: Option<String>,
    pub display_id: String,
    pub app_icon: Option<String>,
}

/// A width/height constraint as pages send it: either `{ max: N }` or a
/// bare number.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Exact(f64),
    Range {
        #[serde(default)]
        max: Option<f64>,
    },
}

impl Dimension {
    pub fn max(&self) -> Option<f64> {
        match *self {
            Self::Exact(v) => Some(v),
            Self::Range { max } => max,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VideoConstraints {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

/// Body of a `GET_SCREEN_SOURCE` request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScreenSourceRequest {
    pub types: Vec<SourceKind>,
    pub video: VideoConstraints,
}

impl ScreenSourceRequest {
    /// Requested kinds; screens and windows when the page names none.
    pub fn kinds(&self) -> Vec<SourceKind> {
        if self.types.is_empty() {
            vec![SourceKind::Screen, SourceKind::Window]
        } else {
            self.types.clone()
        }
    }

    pub fn max_width(&self) -> Option<f64> {
        self.video.width.as_ref().and_then(Dimension::max)
    }

    pub fn max_height(&self) -> Option<f64> {
        self.video.height.as_ref().and_then(Dimension::max)
    }
}

/// The `mandatory` block of a desktop `getUserMedia` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaConstraint {
    pub chrome_media_source: &'static str,
    pub chrome_media_source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
}

impl MediaConstraint {
    pub fn desktop(source_id: &str, max_width: Option<f64>, max_height: Option<f64>) -> Self {
        Self {
            chrome_media_source: "desktop",
            chrome_media_source_id: source_id.to_string(),
            max_width,
            max_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("cancel")]
    Cancelled,

    #[error("source enumeration failed: {0}")]
    Enumeration(String),

    #[error("no screen source available")]
    NoScreen,

    #[error("source with id {0} does not exist")]
    UnknownSource(String),
}

impl CaptureError {
    /// Stable tag put on the wire so pages can tell cancellation from failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Enumeration(_) => "enumeration_failed",
            Self::NoScreen => "no_source",
            Self::UnknownSource(_) => "unknown_source",
        }
    }

    pub fn to_body(&self) -> Value {
        json!({ "error": { "kind": self.kind(), "message": self.to_string() } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_screens_and_windows() {
        let req = ScreenSourceRequest::default();
        assert_eq!(req.kinds(), vec![SourceKind::Screen, SourceKind::Window]);
        assert_eq!(req.max_width(), None);
    }

    #[test]
    fn bare_number_dimension() {
        let req: ScreenSourceRequest =
            serde_json::from_value(json!({"video": {"width": 1280, "height": {"max": 720}}}))
                .unwrap();
        assert_eq!(req.max_width(), Some(1280.0));
        assert_eq!(req.max_height(), Some(720.0));
    }

    #[test]
    fn null_dimensions_are_absent() {
        let req: ScreenSourceRequest =
            serde_json::from_value(json!({"video": {"width": null, "height": null}})).unwrap();
        assert_eq!(req.max_width(), None);
        assert_eq!(req.max_height(), None);
    }

    #[test]
    fn constraint_wire_shape() {
        let c = MediaConstraint::desktop("screen:0:0", Some(1920.0), None);
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({
                "chromeMediaSource": "desktop",
                "chromeMediaSourceId": "screen:0:0",
                "maxWidth": 1920.0
            })
        );
    }

    #[test]
    fn error_body_distinguishes_cancel() {
        let body = CaptureError::Cancelled.to_body();
        assert_eq!(body["error"]["kind"], "cancelled");
        assert_eq!(body["error"]["message"], "cancel");

        let body = CaptureError::Enumeration("portal denied".into()).to_body();
        assert_eq!(body["error"]["kind"], "enumeration_failed");
    }
}
