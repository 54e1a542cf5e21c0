//! Central application state container.
//!
//! [`AppState`] is the single source of truth the modes, actions, and view
//! models read from: the item arena (backend snapshot), the navigation
//! context over it, the content cache, and the last known settings. It is
//! owned by the root [`App`](crate::app::App) and passed to modes by
//! reference; there is no module-level mutable state anywhere in the crate.

use crate::bridge::{Bridge, Settings};
use crate::cache::{ContentCache, ContentStatus};
use crate::domain::{ContentHash, Item, ItemArena, ItemSnapshot, Result};
use crate::stack::{Nav, TypeFilter};
use std::rc::Rc;

/// All shared frontend state.
///
/// Mode-local state (palette query, editor buffer, pipe execution tracking)
/// lives inside the mode implementations, not here.
pub struct AppState {
    /// Current backend snapshot, flattened into the id-keyed arena.
    pub arena: ItemArena,

    /// Navigation context: frame path, selection, filters.
    pub nav: Nav,

    /// Hash-keyed content cache fronting the backend store.
    pub cache: ContentCache,

    /// Last known user settings; seeded into the settings mode and updated
    /// optimistically on save.
    pub settings: Settings,

    bridge: Rc<dyn Bridge>,
}

impl AppState {
    /// Creates empty state wired to a bridge.
    #[must_use]
    pub fn new(bridge: Rc<dyn Bridge>, cache_capacity: usize) -> Self {
        Self {
            arena: ItemArena::default(),
            nav: Nav::new(),
            cache: ContentCache::new(cache_capacity),
            settings: Settings::default(),
            bridge,
        }
    }

    /// The backend bridge handle.
    #[must_use]
    pub fn bridge(&self) -> &dyn Bridge {
        &*self.bridge
    }

    /// Applies a wholesale item snapshot pushed by the backend.
    ///
    /// Returns whether anything visible changed (callers skip re-rendering
    /// when the snapshot is a no-op refresh). Selection is preserved
    /// numerically, clamped by the navigation rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`ClipstackError::Snapshot`](crate::domain::ClipstackError)
    /// when the snapshot violates a model invariant; previous state is kept
    /// untouched in that case.
    pub fn apply_snapshot(&mut self, snapshot: &[ItemSnapshot]) -> Result<bool> {
        let incoming = ItemArena::from_snapshot(snapshot)?;
        if incoming == self.arena {
            tracing::debug!("items unchanged, skipping render");
            return Ok(false);
        }

        self.arena = incoming;
        self.nav.rebuild(&self.arena);
        Ok(true)
    }

    /// The item under the cursor, or `None` (empty listing / filtered out).
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.nav.selected_item(&self.arena)
    }

    /// The stack the current frame views into, when browsing nested.
    #[must_use]
    pub fn parent_stack(&self) -> Option<&Item> {
        self.nav.parent_stack_id().and_then(|id| self.arena.get(id))
    }

    /// Ensures content for `hash` is resolved or being fetched.
    ///
    /// Thin wrapper tying the cache to this state's bridge handle.
    pub fn request_content(&mut self, hash: &ContentHash) -> ContentStatus {
        self.cache.request(hash, &*self.bridge)
    }

    /// Applies a content-type filter and re-homes the selection.
    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.nav.set_type_filter(kind, &self.arena);
    }

    /// Drills into the selected stack item; `false` when the selection is not
    /// a stack.
    pub fn descend(&mut self) -> bool {
        self.nav.descend(&self.arena)
    }

    /// Pops back to the parent level; `false` at the root.
    pub fn ascend(&mut self) -> bool {
        self.nav.ascend(&self.arena)
    }

    /// Appends a character to the free-text filter.
    pub fn push_filter_char(&mut self, c: char) {
        self.nav.push_query_char(c, &self.arena);
    }

    /// Removes the last free-text filter character.
    pub fn pop_filter_char(&mut self) {
        self.nav.pop_query_char(&self.arena);
    }

    /// Clears the free-text filter; `false` when it was already empty.
    pub fn clear_filter(&mut self) -> bool {
        self.nav.clear_query(&self.arena)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("items", &self.arena.len())
            .field("nav_depth", &self.nav.depth())
            .field("cached_bodies", &self.cache.len())
            .finish_non_exhaustive()
    }
}
