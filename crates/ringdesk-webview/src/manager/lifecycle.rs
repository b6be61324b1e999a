use ringdesk_common::{new_window_id, Parent, SurfaceKey};
use tracing::{debug, info, warn};

use crate::provider::{SurfaceOptions, SurfaceProvider};

use super::handle::{Transition, WindowHandle};
use super::registry::WindowRegistry;
use super::routing::{LinkOrigin, LinkPolicy, Route};

/// Result of a window-opening attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A child surface was created and registered under this id.
    Opened(String),
    /// The URL was handed to the system browser.
    OpenedExternally,
    /// The host could not create the surface or open the URL.
    Failed,
}

/// Creates child surfaces, keeps the registry in step with them, and
/// routes links that must leave the shell.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLifecycle {
    policy: LinkPolicy,
}

impl SurfaceLifecycle {
    pub fn new(policy: LinkPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    /// `WINDOW_MANAGER_CREATE`.
    pub fn create_explicit<P: SurfaceProvider + ?Sized>(
        &self,
        provider: &mut P,
        registry: &mut WindowRegistry,
        url: &str,
        always_open_in_browser: bool,
    ) -> CreateOutcome {
        let origin = LinkOrigin::Explicit {
            always_open_in_browser,
        };
        match self.policy.route(url, origin) {
            Route::External => open_external(provider, url),
            Route::InApp => {
                let id = new_window_id(|candidate| registry.contains(candidate));
                open_child(provider, registry, id, url)
            }
        }
    }

    /// Content tried to open a new top-level target.
    pub fn handle_new_window<P: SurfaceProvider + ?Sized>(
        &self,
        provider: &mut P,
        registry: &mut WindowRegistry,
        opener: SurfaceKey,
        url: &str,
        frame_name: Option<&str>,
    ) -> CreateOutcome {
        debug!(%opener, url, ?frame_name, "new window requested");
        match self.policy.route(url, LinkOrigin::Implicit) {
            Route::External => open_external(provider, url),
            Route::InApp => {
                let id = match frame_name {
                    Some(name) if is_named_frame(name) => name.to_string(),
                    _ => new_window_id(|candidate| registry.contains(candidate)),
                };
                open_child(provider, registry, id, url)
            }
        }
    }

    /// A guarded child navigation was stopped by the host.
    pub fn handle_external_navigation<P: SurfaceProvider + ?Sized>(
        &self,
        provider: &mut P,
        surface: SurfaceKey,
        url: &str,
    ) {
        if self.policy.navigation_route(url) == Route::InApp {
            debug!(%surface, url, "navigation reported as external but routes in-app");
            return;
        }

        open_external(provider, url);

        // The root window hosts the app itself and is never closed here.
        if surface != provider.root() {
            if let Err(e) = provider.close(surface) {
                warn!(%surface, error = %e, "failed to close child after external navigation");
            }
        }
    }

    /// The host reported the surface gone.
    pub fn handle_closed(&self, registry: &mut WindowRegistry, surface: SurfaceKey) -> Vec<String> {
        if let Some(handle) = registry.find_by_surface_mut(surface) {
            handle.advance(Transition::Closed);
        }
        registry.remove_by_surface(surface)
    }

    pub fn handle_focus_changed(
        &self,
        registry: &mut WindowRegistry,
        surface: SurfaceKey,
        focused: bool,
    ) {
        let transition = if focused {
            Transition::FocusGained
        } else {
            Transition::FocusLost
        };
        if let Some(handle) = registry.find_by_surface_mut(surface) {
            handle.advance(transition);
        }
    }
}

/// `_blank`, `_self` and friends are targets, not names.
fn is_named_frame(name: &str) -> bool {
    !name.trim().is_empty() && !name.starts_with('_')
}

fn open_external<P: SurfaceProvider + ?Sized>(provider: &mut P, url: &str) -> CreateOutcome {
    match provider.open_external(url) {
        Ok(()) => {
            info!(url, "opened in system browser");
            CreateOutcome::OpenedExternally
        }
        Err(e) => {
            warn!(url, error = %e, "failed to open in system browser");
            CreateOutcome::Failed
        }
    }
}

fn open_child<P: SurfaceProvider + ?Sized>(
    provider: &mut P,
    registry: &mut WindowRegistry,
    id: String,
    url: &str,
) -> CreateOutcome {
    let surface = match provider.create_surface(&SurfaceOptions::child()) {
        Ok(surface) => surface,
        Err(e) => {
            warn!(id = %id, url, error = %e, "failed to create child surface");
            return CreateOutcome::Failed;
        }
    };
    if let Err(e) = provider.load_url(surface, url) {
        warn!(id = %id, %surface, url, error = %e, "failed to load child surface");
        if let Err(e) = provider.destroy(surface) {
            debug!(%surface, error = %e, "discarding unloaded surface failed");
        }
        return CreateOutcome::Failed;
    }

    let mut handle = WindowHandle::new(id.clone(), surface, Parent::Child);
    match provider.show(surface) {
        Ok(()) => {
            handle.advance(Transition::Shown);
        }
        Err(e) => warn!(id = %id, %surface, error = %e, "failed to show child surface"),
    }

    registry.put(id.clone(), handle);
    info!(id = %id, %surface, url, "child window opened");
    CreateOutcome::Opened(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::WindowState;
    use crate::testing::FakeProvider;

    const MEETING: &str = "https://meetings.ringcentral.com/j/1";

    fn setup() -> (SurfaceLifecycle, FakeProvider, WindowRegistry) {
        (
            SurfaceLifecycle::default(),
            FakeProvider::new(),
            WindowRegistry::new(),
        )
    }

    #[test]
    fn explicit_create_registers_shown_child() {
        let (lc, mut p, mut reg) = setup();
        let outcome = lc.create_explicit(&mut p, &mut reg, "https://example.com", false);

        let CreateOutcome::Opened(id) = outcome else {
            panic!("expected a window, got {outcome:?}");
        };
        let handle = reg.get(&id).unwrap();
        assert_eq!(handle.parent, Parent::Child);
        assert_eq!(handle.state(), WindowState::Visible);
        assert_eq!(p.url_of(handle.surface).as_deref(), Some("https://example.com"));
        assert!(p.is_visible(handle.surface));
    }

    #[test]
    fn explicit_ids_are_unique_within_a_millisecond() {
        let (lc, mut p, mut reg) = setup();
        for _ in 0..5 {
            lc.create_explicit(&mut p, &mut reg, "https://example.com", false);
        }
        let mut ids = reg.all_ids();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn always_open_in_browser_goes_external() {
        let (lc, mut p, mut reg) = setup();
        let outcome = lc.create_explicit(&mut p, &mut reg, "https://example.com", true);
        assert_eq!(outcome, CreateOutcome::OpenedExternally);
        assert_eq!(p.external, vec!["https://example.com"]);
        assert!(reg.is_empty());
    }

    #[test]
    fn provider_failure_reports_failed() {
        let (lc, mut p, mut reg) = setup();
        p.fail_create = true;
        let outcome = lc.create_explicit(&mut p, &mut reg, "https://example.com", false);
        assert_eq!(outcome, CreateOutcome::Failed);
        assert!(reg.is_empty());
    }

    #[test]
    fn load_failure_discards_the_surface() {
        let (lc, mut p, mut reg) = setup();
        p.fail_load = true;
        let outcome = lc.create_explicit(&mut p, &mut reg, "https://example.com", false);
        assert_eq!(outcome, CreateOutcome::Failed);
        assert!(reg.is_empty());
        assert_eq!(p.surface_count(), 1);
        assert!(p.calls.iter().any(|c| c.starts_with("destroy")));
    }

    #[test]
    fn implicit_meeting_link_is_discarded() {
        let (lc, mut p, mut reg) = setup();
        let root = p.root();
        let outcome = lc.handle_new_window(&mut p, &mut reg, root, MEETING, Some("meeting"));
        assert_eq!(outcome, CreateOutcome::OpenedExternally);
        assert_eq!(p.external, vec![MEETING]);
        assert_eq!(p.surface_count(), 1);
    }

    #[test]
    fn implicit_in_app_link_uses_frame_name() {
        let (lc, mut p, mut reg) = setup();
        let root = p.root();
        let outcome = lc.handle_new_window(
            &mut p,
            &mut reg,
            root,
            "https://v.ringcentral.com/conf/9",
            Some("video"),
        );
        assert_eq!(outcome, CreateOutcome::Opened("video".into()));
        assert!(reg.contains("video"));
    }

    #[test]
    fn blank_target_gets_generated_id() {
        let (lc, mut p, mut reg) = setup();
        let root = p.root();
        let outcome = lc.handle_new_window(&mut p, &mut reg, root, "about:blank", Some("_blank"));
        let CreateOutcome::Opened(id) = outcome else {
            panic!("expected a window");
        };
        assert_ne!(id, "_blank");
    }

    #[test]
    fn guarded_navigation_closes_child() {
        let (lc, mut p, mut reg) = setup();
        let CreateOutcome::Opened(id) =
            lc.create_explicit(&mut p, &mut reg, "https://example.com", false)
        else {
            panic!("expected a window");
        };
        let surface = reg.get(&id).unwrap().surface;

        lc.handle_external_navigation(&mut p, surface, MEETING);
        assert_eq!(p.external, vec![MEETING]);
        assert_eq!(p.take_closed(), vec![surface]);

        lc.handle_closed(&mut reg, surface);
        assert!(reg.get(&id).is_none());
    }

    #[test]
    fn guarded_navigation_never_closes_root() {
        let (lc, mut p, _reg) = setup();
        let root = p.root();
        lc.handle_external_navigation(&mut p, root, MEETING);
        assert_eq!(p.external, vec![MEETING]);
        assert!(p.take_closed().is_empty());
    }

    #[test]
    fn focus_events_advance_state() {
        let (lc, mut p, mut reg) = setup();
        let CreateOutcome::Opened(id) =
            lc.create_explicit(&mut p, &mut reg, "https://example.com", false)
        else {
            panic!("expected a window");
        };
        let surface = reg.get(&id).unwrap().surface;
        lc.handle_focus_changed(&mut reg, surface, true);
        assert_eq!(reg.get(&id).unwrap().state(), WindowState::Focused);
        lc.handle_focus_changed(&mut reg, surface, false);
        assert_eq!(reg.get(&id).unwrap().state(), WindowState::Unfocused);
    }
}
