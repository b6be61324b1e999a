//! Capture source enumeration backed by winit's monitor list.
//!
//! Screens are the only sources the shell can name portably. Window
//! sources need a platform capture backend and are not offered.

use ringdesk_webview::capture::{CaptureSource, SourceKind};
use winit::window::Window;

/// Source id for the `index`th monitor, in the `screen:<n>:0` form
/// `chromeMediaSourceId` expects.
pub fn screen_source_id(index: usize) -> String {
    format!("screen:{index}:0")
}

pub fn screen_sources(window: &Window) -> Vec<CaptureSource> {
    window
        .available_monitors()
        .enumerate()
        .map(|(index, monitor)| CaptureSource {
            id: screen_source_id(index),
            name: monitor
                .name()
                .unwrap_or_else(|| format!("Screen {}", index + 1)),
            kind: SourceKind::Screen,
            thumbnail: None,
            display_id: index.to_string(),
            app_icon: None,
        })
        .collect()
}

pub fn wants_screens(kinds: &[SourceKind]) -> bool {
    kinds.contains(&SourceKind::Screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_ids() {
        assert_eq!(screen_source_id(0), "screen:0:0");
        assert_eq!(screen_source_id(3), "screen:3:0");
    }

    #[test]
    fn screens_requested() {
        assert!(wants_screens(&[SourceKind::Window, SourceKind::Screen]));
        assert!(!wants_screens(&[SourceKind::Window]));
    }
}
