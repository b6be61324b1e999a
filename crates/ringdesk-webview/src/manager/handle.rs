use chrono::{DateTime, Utc};
use ringdesk_common::{Parent, SurfaceKey};

/// Lifecycle stage of a registered window.
///
/// Focus and visibility answers for content always come from the provider;
/// this only records how far the window has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Created,
    Visible,
    Focused,
    Unfocused,
    /// Terminal.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Shown,
    FocusGained,
    FocusLost,
    Closed,
}

impl WindowState {
    /// Next state, or `None` if the transition is not allowed from here.
    pub fn next(self, transition: Transition) -> Option<Self> {
        use Transition as T;
        use WindowState as S;

        match (self, transition) {
            (S::Closed, _) => None,
            (_, T::Closed) => Some(S::Closed),
            (S::Created, T::Shown) => Some(S::Visible),
            (S::Created, T::FocusLost) => None,
            (_, T::Shown) => Some(self),
            (_, T::FocusGained) => Some(S::Focused),
            (_, T::FocusLost) => Some(S::Unfocused),
        }
    }

    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

/// A live window as seen by content.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowHandle {
    pub id: String,
    pub surface: SurfaceKey,
    pub created_at: DateTime<Utc>,
    pub parent: Parent,
    state: WindowState,
}

impl WindowHandle {
    pub fn new(id: impl Into<String>, surface: SurfaceKey, parent: Parent) -> Self {
        Self {
            id: id.into(),
            surface,
            created_at: Utc::now(),
            parent,
            state: WindowState::Created,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Apply a transition. Returns false and leaves the state alone when
    /// the transition is not allowed.
    pub fn advance(&mut self, transition: Transition) -> bool {
        match self.state.next(transition) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}
