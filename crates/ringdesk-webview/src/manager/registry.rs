use ringdesk_common::SurfaceKey;
use tracing::debug;

use super::handle::WindowHandle;

/// Live child windows addressed by the string ids content knows them by.
///
/// Kept in insertion order so `find_first` and `all_ids` are stable. The
/// registry never tears surfaces down; it only mirrors what the provider
/// reports.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    entries: Vec<(String, WindowHandle)>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten entry keeps its position and
    /// the previous handle is returned.
    pub fn put(&mut self, id: impl Into<String>, handle: WindowHandle) -> Option<WindowHandle> {
        let id = id.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, slot)) => {
                debug!(id = %id, surface = %handle.surface, "window id re-registered");
                Some(std::mem::replace(slot, handle))
            }
            None => {
                debug!(id = %id, surface = %handle.surface, "window registered");
                self.entries.push((id, handle));
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&WindowHandle> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, h)| h)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut WindowHandle> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == id)
            .map(|(_, h)| h)
    }

    /// Idempotent.
    pub fn remove(&mut self, id: &str) -> Option<WindowHandle> {
        let pos = self.entries.iter().position(|(k, _)| k == id)?;
        debug!(id, "window deregistered");
        Some(self.entries.remove(pos).1)
    }

    pub fn find_first(&self, predicate: impl Fn(&WindowHandle) -> bool) -> Option<&WindowHandle> {
        self.entries.iter().map(|(_, h)| h).find(|h| predicate(h))
    }

    pub fn find_by_surface_mut(&mut self, surface: SurfaceKey) -> Option<&mut WindowHandle> {
        self.entries
            .iter_mut()
            .map(|(_, h)| h)
            .find(|h| h.surface == surface)
    }

    pub fn all_ids(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Drop every id bound to `surface`. Returns the removed ids.
    pub fn remove_by_surface(&mut self, surface: SurfaceKey) -> Vec<String> {
        let mut removed = Vec::new();
        self.entries.retain(|(id, h)| {
            if h.surface == surface {
                removed.push(id.clone());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            debug!(%surface, ids = ?removed, "windows deregistered on close");
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ringdesk_common::Parent;

    use super::*;

    fn handle(id: &str, surface: u64) -> WindowHandle {
        WindowHandle::new(id, SurfaceKey(surface), Parent::Child)
    }

    #[test]
    fn put_then_get() {
        let mut reg = WindowRegistry::new();
        assert!(reg.put("a", handle("a", 2)).is_none());
        assert_eq!(reg.get("a").map(|h| h.surface), Some(SurfaceKey(2)));
        assert!(reg.get("b").is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn last_write_wins() {
        let mut reg = WindowRegistry::new();
        reg.put("a", handle("a", 2));
        reg.put("b", handle("b", 3));
        let old = reg.put("a", handle("a", 4));

        assert_eq!(old.map(|h| h.surface), Some(SurfaceKey(2)));
        assert_eq!(reg.get("a").map(|h| h.surface), Some(SurfaceKey(4)));
        assert_eq!(reg.all_ids(), vec!["a", "b"]);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut reg = WindowRegistry::new();
        reg.put("a", handle("a", 2));
        assert!(reg.remove("a").is_some());
        assert!(reg.remove("a").is_none());
        assert!(reg.remove("never").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn find_first_uses_insertion_order() {
        let mut reg = WindowRegistry::new();
        reg.put("x", handle("x", 5));
        reg.put("y", handle("y", 6));
        reg.put("z", handle("z", 7));
        let found = reg.find_first(|h| h.surface.0 >= 6).map(|h| h.id.clone());
        assert_eq!(found.as_deref(), Some("y"));
        assert!(reg.find_first(|h| h.surface.0 > 100).is_none());
    }

    #[test]
    fn all_ids_preserves_insertion_order() {
        let mut reg = WindowRegistry::new();
        for id in ["3", "1", "2"] {
            reg.put(id, handle(id, 9));
        }
        assert_eq!(reg.all_ids(), vec!["3", "1", "2"]);
    }

    #[test]
    fn remove_by_surface_drops_aliases() {
        let mut reg = WindowRegistry::new();
        reg.put("a", handle("a", 2));
        reg.put("b", handle("b", 3));
        reg.put("alias", handle("alias", 2));

        let removed = reg.remove_by_surface(SurfaceKey(2));
        assert_eq!(removed, vec!["a", "alias"]);
        assert_eq!(reg.all_ids(), vec!["b"]);
        assert!(reg.remove_by_surface(SurfaceKey(2)).is_empty());
    }

    #[test]
    fn closing_replaced_surface_keeps_new_entry() {
        let mut reg = WindowRegistry::new();
        reg.put("a", handle("a", 2));
        reg.put("a", handle("a", 3));
        assert!(reg.remove_by_surface(SurfaceKey(2)).is_empty());
        assert!(reg.contains("a"));
    }
}
