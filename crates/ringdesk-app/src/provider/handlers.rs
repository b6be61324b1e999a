//! wry callbacks. Each one only records a `SurfaceEvent`; the event loop
//! drains them into the gateway on the control thread.

use std::sync::{Arc, Mutex};

use ringdesk_common::SurfaceKey;
use ringdesk_webview::manager::Route;
use ringdesk_webview::{LinkPolicy, SurfaceEvent};
use tracing::{debug, warn};
use wry::WebViewBuilder;

pub type EventSink = Arc<Mutex<Vec<SurfaceEvent>>>;

fn push(events: &EventSink, event: SurfaceEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

pub fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: SurfaceKey,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(%surface, body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(%surface, body_len = body.len(), "IPC message from content");
        push(&events, SurfaceEvent::IpcMessage { surface, body });
    })
}

pub fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: SurfaceKey,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(%surface, title = %title, "title changed");
        push(&events, SurfaceEvent::TitleChanged { surface, title });
    })
}

/// Every new-window request is cancelled here and re-raised as an event,
/// so the gateway decides between a child surface and the system browser.
pub fn attach_new_window_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: SurfaceKey,
) -> WebViewBuilder<'a> {
    builder.with_new_window_req_handler(move |url| {
        debug!(%surface, url = %url, "new window requested");
        push(
            &events,
            SurfaceEvent::NewWindowRequested {
                opener: surface,
                url,
                frame_name: None,
            },
        );
        false
    })
}

/// Child surfaces may not navigate into the meetings client.
pub fn attach_navigation_guard<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    surface: SurfaceKey,
    links: LinkPolicy,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        if links.navigation_route(&url) == Route::InApp {
            return true;
        }
        debug!(%surface, url = %url, "navigation leaves the shell");
        push(&events, SurfaceEvent::ExternalNavigation { surface, url });
        false
    })
}
