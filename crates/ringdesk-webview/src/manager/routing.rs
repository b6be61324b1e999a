// =============================================================================
// LINK ROUTING
// =============================================================================

/// How a link reached the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrigin {
    /// `WINDOW_MANAGER_CREATE` from content.
    Explicit { always_open_in_browser: bool },
    /// Content tried to open a new top-level target on its own.
    Implicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    InApp,
    External,
}

/// Decides whether a link opens in a child surface or the system browser.
///
/// Both creation paths go through [`LinkPolicy::route`] so a link is
/// treated the same whether content asked for it or just clicked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPolicy {
    in_app_prefixes: Vec<String>,
    external_patterns: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::new(
            vec!["https://v.ringcentral.com".to_string()],
            vec!["https://meetings.ringcentral.com".to_string()],
        )
    }
}

impl LinkPolicy {
    pub fn new(in_app_prefixes: Vec<String>, external_patterns: Vec<String>) -> Self {
        Self {
            in_app_prefixes,
            external_patterns,
        }
    }

    /// Meeting links run in the native meetings client, never in the shell.
    pub fn is_external_meeting(&self, url: &str) -> bool {
        self.external_patterns
            .iter()
            .any(|p| !p.is_empty() && url.contains(p.as_str()))
    }

    fn is_in_app(&self, url: &str) -> bool {
        self.in_app_prefixes
            .iter()
            .any(|p| url.starts_with(p.as_str()))
    }

    pub fn route(&self, url: &str, origin: LinkOrigin) -> Route {
        if self.is_external_meeting(url) {
            return Route::External;
        }
        match origin {
            LinkOrigin::Explicit {
                always_open_in_browser: true,
            } => Route::External,
            LinkOrigin::Explicit { .. } => Route::InApp,
            LinkOrigin::Implicit if is_web_url(url) && !self.is_in_app(url) => Route::External,
            LinkOrigin::Implicit => Route::InApp,
        }
    }

    /// Route for a navigation inside an existing child surface.
    pub fn navigation_route(&self, url: &str) -> Route {
        if self.is_external_meeting(url) {
            Route::External
        } else {
            Route::InApp
        }
    }
}

fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
