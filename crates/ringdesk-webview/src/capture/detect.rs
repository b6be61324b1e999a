//! Selection strategy detection.

/// How a capture source is chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// The compositor shows its own picker (PipeWire portal), so the first
    /// screen is passed straight through.
    AutoSelect,
    /// The shell shows its own overlay in the page.
    ManualPicker,
}

impl SelectionStrategy {
    /// Decide from the desktop environment, once at startup.
    pub fn detect(var: impl Fn(&str) -> Option<String>) -> Self {
        let wayland_session = var("XDG_SESSION_TYPE")
            .map(|v| v.eq_ignore_ascii_case("wayland"))
            .unwrap_or(false);
        let wayland_display = var("WAYLAND_DISPLAY")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        if wayland_session || wayland_display {
            Self::AutoSelect
        } else {
            Self::ManualPicker
        }
    }

    pub fn from_env() -> Self {
        Self::detect(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn wayland_session_auto_selects() {
        let s = SelectionStrategy::detect(env(&[("XDG_SESSION_TYPE", "wayland")]));
        assert_eq!(s, SelectionStrategy::AutoSelect);
    }

    #[test]
    fn wayland_display_auto_selects() {
        let s = SelectionStrategy::detect(env(&[
            ("XDG_SESSION_TYPE", "x11"),
            ("WAYLAND_DISPLAY", "wayland-0"),
        ]));
        assert_eq!(s, SelectionStrategy::AutoSelect);
    }

    #[test]
    fn x11_uses_manual_picker() {
        let s = SelectionStrategy::detect(env(&[("XDG_SESSION_TYPE", "x11")]));
        assert_eq!(s, SelectionStrategy::ManualPicker);
    }

    #[test]
    fn empty_environment_uses_manual_picker() {
        let s = SelectionStrategy::detect(env(&[("WAYLAND_DISPLAY", "")]));
        assert_eq!(s, SelectionStrategy::ManualPicker);
    }
}
