use crate::scene::{ObjectIndex, ObjectRegistry};

/// Prev/next button visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavVisibility {
    pub prev: bool,
    pub next: bool,
}

/// Index-based cursor over the registry.
///
/// The cursor starts at 1 and is kept in `[1, count]`; the selected object is
/// looked up from it on every access, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionNavigator {
    current: ObjectIndex,
}

impl Default for SelectionNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionNavigator {
    pub fn new() -> Self {
        Self {
            current: ObjectIndex::FIRST,
        }
    }

    pub fn current_index(&self) -> ObjectIndex {
        self.current
    }

    /// The selected object's index, or `None` while the registry is empty.
    pub fn selected(&self, registry: &ObjectRegistry) -> Option<ObjectIndex> {
        registry.get(self.current).map(|object| object.index())
    }

    pub fn next(&mut self, registry: &ObjectRegistry) -> Option<ObjectIndex> {
        if self.current.get() < registry.len() {
            self.current = self.current.next();
        } else {
            log::debug!("Already at last object ({})", self.current);
        }
        self.selected(registry)
    }

    pub fn prev(&mut self, registry: &ObjectRegistry) -> Option<ObjectIndex> {
        match self.current.prev() {
            Some(prev) => self.current = prev,
            None => log::debug!("Already at first object"),
        }
        self.selected(registry)
    }

    pub fn nav_visibility(&self, count: usize) -> NavVisibility {
        nav_visibility(self.current.get(), count)
    }
}

/// Prev/next visibility for a cursor at `current` over `count` objects.
///
/// Nothing is shown for an empty registry.
pub fn nav_visibility(current: usize, count: usize) -> NavVisibility {
    if count == 0 {
        return NavVisibility::default();
    }
    NavVisibility {
        prev: current > 1,
        next: current < count,
    }
}
