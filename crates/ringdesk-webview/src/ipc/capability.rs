//! The capability catalog: every native operation web content may request.

use ringdesk_common::{BridgeError, Rect};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::capture::ScreenSourceRequest;

// =============================================================================
// EVENT NAMES
// =============================================================================

pub mod events {
    pub const CREATE_WINDOW: &str = "WINDOW_MANAGER_CREATE";
    pub const CLOSE_WINDOW: &str = "WINDOW_MANAGER_CLOSE";
    pub const FOCUS_WINDOW: &str = "WINDOW_MANAGER_FOCUS";
    pub const REMOVE_MENU: &str = "WINDOW_MANAGER_REMOVE_MENU";
    pub const DESTROY_WINDOW: &str = "WINDOW_MANAGER_DESTROY";
    pub const FOCUSED_WINDOW_ID: &str = "WINDOW_MANAGER_GET_FOCUSED_ID";
    pub const WINDOW_IDS: &str = "WINDOW_MANAGER_LIST_IDS";
    pub const IS_ROOT_MINIMIZED: &str = "WINDOW_MANAGER_IS_ROOT_MINIMIZED";
    pub const SET_BACKGROUND_COLOR: &str = "WINDOW_MANAGER_SET_BACKGROUND_COLOR";
    pub const GET_BOUNDS: &str = "WINDOW_MANAGER_GET_BOUNDS";
    pub const GET_CONTENT_BOUNDS: &str = "WINDOW_MANAGER_GET_CONTENT_BOUNDS";
    pub const SET_BOUNDS: &str = "WINDOW_MANAGER_SET_BOUNDS";
    pub const CHECK_COMPATIBILITY: &str = "CHECK_COMPATIBILITY";
    pub const CPU_INFO: &str = "SYSTEM_CPU_INFO";
    pub const CPU_USAGE: &str = "SYSTEM_CPU_USAGE";
    pub const FLUSH_STORAGE: &str = "FLUSH_STORAGE";
    pub const PERMISSION_QUERY: &str = "PERMISSION_QUERY";
    pub const SCREEN_SOURCES: &str = "GET_SCREEN_SOURCE";
    pub const PICKER_SELECT: &str = "SCREEN_PICKER_SELECT";
    pub const PICKER_CANCEL: &str = "SCREEN_PICKER_CANCEL";

    /// Fire-and-forget unread count. Carries a bare integer, never answered.
    pub const BADGE_COUNT: &str = "show-notifications-count";
}

/// Every request event the gateway answers. Anything else is ignored.
pub const CAPABILITY_EVENTS: &[&str] = &[
    events::CREATE_WINDOW,
    events::CLOSE_WINDOW,
    events::FOCUS_WINDOW,
    events::REMOVE_MENU,
    events::DESTROY_WINDOW,
    events::FOCUSED_WINDOW_ID,
    events::WINDOW_IDS,
    events::IS_ROOT_MINIMIZED,
    events::SET_BACKGROUND_COLOR,
    events::GET_BOUNDS,
    events::GET_CONTENT_BOUNDS,
    events::SET_BOUNDS,
    events::CHECK_COMPATIBILITY,
    events::CPU_INFO,
    events::CPU_USAGE,
    events::FLUSH_STORAGE,
    events::PERMISSION_QUERY,
    events::SCREEN_SOURCES,
    events::PICKER_SELECT,
    events::PICKER_CANCEL,
];

/// Check whether an event name is a capability the gateway answers.
pub fn is_capability_event(event: &str) -> bool {
    CAPABILITY_EVENTS.contains(&event)
}

// =============================================================================
// BODIES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOptions {
    pub always_open_in_browser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateWindow {
    pub url: String,
    #[serde(default)]
    pub options: CreateOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetBackgroundColor {
    pub id: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetBounds {
    pub id: String,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerSelect {
    pub request_id: u64,
    pub source_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerCancel {
    pub request_id: u64,
}

// =============================================================================
// CAPABILITY
// =============================================================================

/// A decoded request, one variant per capability with its typed body.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    CreateWindow(CreateWindow),
    CloseWindow { id: String },
    /// `None` focuses the root window.
    FocusWindow { id: Option<String> },
    RemoveMenu { id: String },
    DestroyWindow { id: String },
    FocusedWindowId,
    WindowIds,
    IsRootMinimized,
    SetBackgroundColor(SetBackgroundColor),
    GetBounds { id: String },
    GetContentBounds { id: String },
    SetBounds(SetBounds),
    CheckCompatibility,
    CpuInfo,
    CpuUsage,
    FlushStorage,
    PermissionQuery { permission: String },
    ScreenSources(ScreenSourceRequest),
    PickerSelect(PickerSelect),
    PickerCancel(PickerCancel),
}

impl Capability {
    /// Decode a request body for `event`.
    ///
    /// Returns `Ok(None)` for events outside the catalog so that newer
    /// content talking to an older shell is ignored rather than rejected.
    pub fn decode(event: &str, body: Value) -> Result<Option<Self>, BridgeError> {
        let capability = match event {
            events::CREATE_WINDOW => Self::CreateWindow(parse(event, body)?),
            events::CLOSE_WINDOW => Self::CloseWindow {
                id: window_id(event, body)?,
            },
            events::FOCUS_WINDOW => Self::FocusWindow {
                id: optional_window_id(event, body)?,
            },
            events::REMOVE_MENU => Self::RemoveMenu {
                id: window_id(event, body)?,
            },
            events::DESTROY_WINDOW => Self::DestroyWindow {
                id: window_id(event, body)?,
            },
            events::FOCUSED_WINDOW_ID => Self::FocusedWindowId,
            events::WINDOW_IDS => Self::WindowIds,
            events::IS_ROOT_MINIMIZED => Self::IsRootMinimized,
            events::SET_BACKGROUND_COLOR => Self::SetBackgroundColor(parse(event, body)?),
            events::GET_BOUNDS => Self::GetBounds {
                id: window_id(event, body)?,
            },
            events::GET_CONTENT_BOUNDS => Self::GetContentBounds {
                id: window_id(event, body)?,
            },
            events::SET_BOUNDS => Self::SetBounds(parse(event, body)?),
            events::CHECK_COMPATIBILITY => Self::CheckCompatibility,
            events::CPU_INFO => Self::CpuInfo,
            events::CPU_USAGE => Self::CpuUsage,
            events::FLUSH_STORAGE => Self::FlushStorage,
            events::PERMISSION_QUERY => Self::PermissionQuery {
                permission: match body {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
            },
            events::SCREEN_SOURCES => Self::ScreenSources(if body.is_null() {
                ScreenSourceRequest::default()
            } else {
                parse(event, body)?
            }),
            events::PICKER_SELECT => Self::PickerSelect(parse(event, body)?),
            events::PICKER_CANCEL => Self::PickerCancel(parse(event, body)?),
            _ => return Ok(None),
        };
        Ok(Some(capability))
    }
}

fn parse<T: DeserializeOwned>(event: &str, body: Value) -> Result<T, BridgeError> {
    serde_json::from_value(body).map_err(|e| BridgeError::InvalidBody {
        event: event.to_string(),
        reason: e.to_string(),
    })
}

/// Window ids are strings, but pages occasionally pass them as numbers.
fn window_id(event: &str, body: Value) -> Result<String, BridgeError> {
    optional_window_id(event, body)?.ok_or_else(|| BridgeError::InvalidBody {
        event: event.to_string(),
        reason: "missing window id".into(),
    })
}

fn optional_window_id(event: &str, body: Value) -> Result<Option<String>, BridgeError> {
    match body {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(BridgeError::InvalidBody {
            event: event.to_string(),
            reason: format!("expected window id, got {other}"),
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================
