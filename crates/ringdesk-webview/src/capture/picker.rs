//! In-page source picker overlay.
//!
//! The overlay is injected into the requesting surface as a script. Source
//! names and ids come from the OS (window titles are attacker-influenced),
//! so every value is HTML-escaped into the markup and the markup itself is
//! embedded as a JSON string literal.

use super::source::CaptureSource;
use crate::ipc::{events, js_safe_json};

const PICKER_CSS: &str = r#"
.ringdesk-picker {
  position: fixed; top: 0; left: 0; width: 100%; height: 100vh;
  background: rgba(30,30,30,.75); color: #fff; z-index: 10000000;
  display: flex; align-items: center; justify-content: center;
}
.ringdesk-picker__scroller { width: 100%; max-height: 100vh; overflow-y: auto; }
.ringdesk-picker__list {
  max-width: calc(100% - 100px); margin: 50px; padding: 0;
  display: flex; flex-wrap: wrap; list-style: none; overflow: hidden;
  justify-content: center;
}
.ringdesk-picker__item { display: flex; margin: 4px; }
.ringdesk-picker__btn {
  display: flex; flex-direction: column; align-items: stretch;
  width: 145px; margin: 0; border: 0; border-radius: 3px; padding: 4px;
  background: #252626; color: #fff; text-align: left;
  transition: background-color .15s, box-shadow .15s;
}
.ringdesk-picker__btn:hover, .ringdesk-picker__btn:focus { background: rgba(98,100,167,.8); }
.ringdesk-picker__thumbnail { width: 100%; height: 81px; object-fit: cover; }
.ringdesk-picker__name {
  margin: 6px 0; white-space: nowrap; text-overflow: ellipsis; overflow: hidden;
}
"#;

fn overlay_id(request_id: u64) -> String {
    format!("ringdesk-picker-{request_id}")
}

fn style_id(request_id: u64) -> String {
    format!("ringdesk-picker-style-{request_id}")
}

/// Escape text for an HTML text node or a double-quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Only inline raster images are allowed as thumbnails.
fn safe_thumbnail(thumbnail: Option<&str>) -> Option<&str> {
    thumbnail.filter(|t| {
        t.starts_with("data:image/png;base64,") || t.starts_with("data:image/jpeg;base64,")
    })
}

/// Markup for the source list.
pub fn overlay_markup(sources: &[CaptureSource]) -> String {
    let mut html = String::from(
        r#"<div class="ringdesk-picker__scroller"><ul class="ringdesk-picker__list">"#,
    );
    for source in sources {
        let id = escape_html(&source.id);
        let name = escape_html(&source.name);
        html.push_str(r#"<li class="ringdesk-picker__item">"#);
        html.push_str(&format!(
            r#"<button class="ringdesk-picker__btn" data-id="{id}" title="{name}">"#
        ));
        if let Some(thumb) = safe_thumbnail(source.thumbnail.as_deref()) {
            html.push_str(&format!(
                r#"<img class="ringdesk-picker__thumbnail" src="{}" />"#,
                escape_html(thumb)
            ));
        }
        html.push_str(&format!(
            r#"<span class="ringdesk-picker__name">{name}</span></button></li>"#
        ));
    }
    html.push_str("</ul></div>");
    html
}

fn js_string(value: &str) -> String {
    js_safe_json(&serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string()))
}

/// Script that shows the overlay for one capture request.
///
/// Clicking a source sends `SCREEN_PICKER_SELECT`; clicking the backdrop
/// sends `SCREEN_PICKER_CANCEL`. Teardown is driven from the native side.
pub fn overlay_script(request_id: u64, sources: &[CaptureSource]) -> String {
    format!(
        r#"(function() {{
    var style = document.createElement('style');
    style.id = {style_id};
    style.textContent = {css};
    document.head.append(style);
    var overlay = document.createElement('div');
    overlay.id = {overlay_id};
    overlay.className = 'ringdesk-picker';
    overlay.innerHTML = {markup};
    document.body.appendChild(overlay);
    overlay.addEventListener('click', function(e) {{
        var btn = e.target.closest('.ringdesk-picker__btn');
        if (btn) {{
            e.preventDefault();
            window.ringdesk.ipc.request({select}, {{ requestId: {request_id}, sourceId: btn.getAttribute('data-id') }});
        }} else {{
            window.ringdesk.ipc.request({cancel}, {{ requestId: {request_id} }});
        }}
    }});
}})();"#,
        style_id = js_string(&style_id(request_id)),
        css = js_string(PICKER_CSS),
        overlay_id = js_string(&overlay_id(request_id)),
        markup = js_string(&overlay_markup(sources)),
        select = js_string(events::PICKER_SELECT),
        cancel = js_string(events::PICKER_CANCEL),
    )
}

/// Script that removes the overlay and its stylesheet.
pub fn teardown_script(request_id: u64) -> String {
    format!(
        r#"(function() {{
    var overlay = document.getElementById({overlay_id});
    if (overlay) {{ overlay.remove(); }}
    var style = document.getElementById({style_id});
    if (style) {{ style.remove(); }}
}})();"#,
        overlay_id = js_string(&overlay_id(request_id)),
        style_id = js_string(&style_id(request_id)),
    )
}
