//! IPC protocol between the shell and the embedded web content.
//!
//! - **Content -> native**: the page calls `window.ringdesk.ipc.request(event, body)`,
//!   which posts a JSON envelope through `window.ipc.postMessage`.
//! - **Native -> content**: the shell evaluates `window.ringdesk.ipc._dispatch(...)`
//!   in the target surface with a RECEIVED or RESPONSE envelope.

mod capability;
mod envelope;

pub use capability::{
    events, is_capability_event, Capability, CreateOptions, CreateWindow, PickerCancel,
    PickerSelect, SetBackgroundColor, SetBounds, CAPABILITY_EVENTS,
};
pub use envelope::{
    invalid_body, Inbound, Notification, Request, ResponseEnvelope, ResponseKind, ResponsePayload,
};

/// Bridge installed into every surface before page scripts run.
///
/// `request` resolves with the RESPONSE body; `onReceived` fires on the
/// acknowledgement so callers can time out delivery and completion
/// separately. `getDisplayMedia` is routed through the screen-source broker.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.ringdesk && window.ringdesk.ipc) { return; }
    var nextId = 1;
    var pending = {};
    window.ringdesk = window.ringdesk || {};
    window.ringdesk.ipc = {
        request: function(event, body, onReceived) {
            var id = nextId++;
            return new Promise(function(resolve) {
                pending[id] = { resolve: resolve, onReceived: onReceived };
                window.ipc.postMessage(JSON.stringify({
                    event: event,
                    payload: { id: id, body: body === undefined ? null : body }
                }));
            });
        },
        notify: function(event, payload) {
            window.ipc.postMessage(JSON.stringify({ event: event, payload: payload }));
        },
        _dispatch: function(message) {
            var payload = message && message.payload;
            if (!payload) { return; }
            var entry = pending[payload.id];
            if (!entry) { return; }
            if (payload.type === 'RECEIVED') {
                if (entry.onReceived) { entry.onReceived(payload.id); }
                return;
            }
            delete pending[payload.id];
            entry.resolve(payload.body);
        }
    };
    if (navigator.mediaDevices) {
        navigator.mediaDevices.getDisplayMedia = function(options) {
            var video = (options && options.video) || {};
            return window.ringdesk.ipc.request('GET_SCREEN_SOURCE', {
                types: ['screen', 'window'],
                video: { width: video.width || null, height: video.height || null }
            }).then(function(body) {
                if (!body || body.error) {
                    throw (body && body.error && body.error.kind === 'cancelled')
                        ? 'cancel'
                        : new Error(body && body.error ? body.error.message : 'no source');
                }
                return navigator.mediaDevices.getUserMedia({
                    audio: false,
                    video: { mandatory: body }
                });
            });
        };
    }
})();
"#;

/// Generate the script that delivers an envelope to the page.
pub fn js_dispatch_envelope(envelope: &ResponseEnvelope) -> String {
    let json = serde_json::to_string(envelope).unwrap_or_else(|_| "null".to_string());
    format!("window.ringdesk.ipc._dispatch({});", js_safe_json(&json))
}

/// JSON is valid JS except for the two line separators older engines
/// reject inside string literals.
pub(crate) fn js_safe_json(json: &str) -> String {
    json.replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
