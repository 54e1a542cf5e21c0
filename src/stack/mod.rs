//! Stack navigation model: frames, selection, and filters.
//!
//! The navigation context is a path of [`Frame`]s into the item arena. Frame
//! zero views the backend's top-level listing; each deeper frame views the
//! children of a selected stack item. Depth is unbounded in the model and
//! bounded in practice by user-created nesting. Frames are transient
//! projections: descending into a stack is a client-side lookup, never a
//! backend round trip.
//!
//! # Selection invariant
//!
//! `0 <= selected < visible.len()` whenever the visible list is non-empty.
//! An empty visible list is the "no selection" sentinel: the stored index is
//! meaningless and [`Nav::selected_id`] returns `None`.
//!
//! # Refresh policy
//!
//! On a snapshot refresh the numeric selection index is preserved, clamped to
//! the new visible length. Selection re-homes to 0 only when a filter
//! changes.

use crate::domain::{ContentType, Item, ItemArena, ItemId};

/// Content-type filter variants offered by the filter mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Text,
    Links,
    Images,
    Markdown,
    Stacks,
}

impl TypeFilter {
    /// Every variant, in the order the filter mode lists them.
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Text,
        Self::Links,
        Self::Images,
        Self::Markdown,
        Self::Stacks,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Text => "Text",
            Self::Links => "Links",
            Self::Images => "Images",
            Self::Markdown => "Markdown",
            Self::Stacks => "Stacks",
        }
    }

    /// Whether an item passes this filter.
    #[must_use]
    pub fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Text => item.content_type == ContentType::Text,
            Self::Links => item.content_type == ContentType::Link,
            Self::Images => item.content_type == ContentType::Image,
            Self::Markdown => {
                item.content_type == ContentType::Text && item.mime_type == "text/markdown"
            }
            Self::Stacks => item.content_type == ContentType::Stack,
        }
    }
}

/// Combined free-text and content-type filter over the current frame.
///
/// The two conditions narrow conjunctively. The free-text match is a
/// case-insensitive substring test against the item's preview string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub query: String,
    pub kind: TypeFilter,
}

impl Filter {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.kind != TypeFilter::All
    }

    fn matches(&self, item: &Item) -> bool {
        if !self.kind.matches(item) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        item.terse
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }
}

/// One level of the navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Id of the stack item this frame views into; `None` for the root frame.
    pub parent: Option<ItemId>,

    /// Visible (filtered) item ids at this level.
    pub visible: Vec<ItemId>,

    /// Selection index into `visible`. Meaningless while `visible` is empty.
    pub selected: usize,
}

impl Frame {
    fn new(parent: Option<ItemId>) -> Self {
        Self {
            parent,
            visible: Vec::new(),
            selected: 0,
        }
    }
}

/// The navigation context: a frame path plus the current filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nav {
    frames: Vec<Frame>,
    filter: Filter,
}

impl Nav {
    /// A navigation context at the root level with no filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
            filter: Filter::default(),
        }
    }

    /// Recomputes every frame's visible list from the arena and the filter,
    /// preserving selection indices numerically (clamped).
    ///
    /// Frames whose parent stack vanished from the arena (or stopped being a
    /// stack) are popped along with everything beneath them. The filter
    /// applies to the current (deepest) frame only; ancestor frames stay
    /// unfiltered so ascending always lands on the full listing.
    pub fn rebuild(&mut self, arena: &ItemArena) {
        let _span = tracing::debug_span!("nav_rebuild", depth = self.frames.len()).entered();

        let mut keep = self.frames.len();
        for (depth, frame) in self.frames.iter().enumerate().skip(1) {
            let parent_ok = frame
                .parent
                .as_ref()
                .and_then(|id| arena.get(id))
                .is_some_and(Item::is_stack);
            if !parent_ok {
                keep = depth;
                break;
            }
        }
        self.frames.truncate(keep);

        let deepest = self.frames.len() - 1;
        for depth in 0..self.frames.len() {
            let candidates: Vec<ItemId> = match &self.frames[depth].parent {
                None => arena.roots().to_vec(),
                Some(id) => arena.children_of(id).to_vec(),
            };

            let filtered = depth == deepest;
            let visible: Vec<ItemId> = candidates
                .into_iter()
                .filter(|id| {
                    if !filtered {
                        return true;
                    }
                    arena.get(id).is_some_and(|item| self.filter.matches(item))
                })
                .collect();

            // ancestor frames track the stack that was descended into, so
            // ascending lands back on it even if the listing reordered
            let descended_into = self
                .frames
                .get(depth + 1)
                .and_then(|child| child.parent.clone());

            let frame = &mut self.frames[depth];
            frame.visible = visible;
            if let Some(position) = descended_into
                .and_then(|id| frame.visible.iter().position(|v| *v == id))
            {
                frame.selected = position;
            } else if frame.visible.is_empty() {
                frame.selected = 0;
            } else {
                frame.selected = frame.selected.min(frame.visible.len() - 1);
            }
        }

        tracing::debug!(
            visible = self.current().visible.len(),
            "navigation rebuilt"
        );
    }

    /// Advances the selection by `delta` with wraparound modulo the visible
    /// count. Safe no-op while the visible list is empty.
    pub fn move_selection(&mut self, delta: isize) {
        let frame = self.current_mut();
        let len = frame.visible.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let wrapped = (frame.selected as isize + delta).rem_euclid(len as isize);
        #[allow(clippy::cast_sign_loss)]
        {
            frame.selected = wrapped as usize;
        }
    }

    /// Id of the selected item, or `None` when nothing is visible.
    #[must_use]
    pub fn selected_id(&self) -> Option<&ItemId> {
        let frame = self.current();
        frame.visible.get(frame.selected)
    }

    /// Resolves the selected item against the arena.
    #[must_use]
    pub fn selected_item<'a>(&self, arena: &'a ItemArena) -> Option<&'a Item> {
        self.selected_id().and_then(|id| arena.get(id))
    }

    /// Descends into the selected item's children when it is a stack.
    ///
    /// Returns `false` (and changes nothing) when nothing is selected or the
    /// selection is not a stack.
    pub fn descend(&mut self, arena: &ItemArena) -> bool {
        let Some(item) = self.selected_item(arena) else {
            return false;
        };
        if !item.is_stack() {
            return false;
        }

        tracing::debug!(stack = %item.id, "descending into stack");
        self.frames.push(Frame::new(Some(item.id.clone())));
        self.filter.query.clear();
        self.rebuild(arena);
        true
    }

    /// Pops back to the parent level. Returns `false` at the root.
    pub fn ascend(&mut self, arena: &ItemArena) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        self.frames.pop();
        self.filter.query.clear();
        self.rebuild(arena);
        true
    }

    /// Appends a character to the free-text filter and re-homes selection.
    pub fn push_query_char(&mut self, c: char, arena: &ItemArena) {
        self.filter.query.push(c);
        self.home_and_rebuild(arena);
    }

    /// Removes the last character of the free-text filter and re-homes
    /// selection.
    pub fn pop_query_char(&mut self, arena: &ItemArena) {
        self.filter.query.pop();
        self.home_and_rebuild(arena);
    }

    /// Clears the free-text filter. Returns `false` when it was already
    /// empty.
    pub fn clear_query(&mut self, arena: &ItemArena) -> bool {
        if self.filter.query.is_empty() {
            return false;
        }
        self.filter.query.clear();
        self.home_and_rebuild(arena);
        true
    }

    /// Sets the content-type filter and re-homes selection.
    pub fn set_type_filter(&mut self, kind: TypeFilter, arena: &ItemArena) {
        self.filter.kind = kind;
        self.home_and_rebuild(arena);
    }

    fn home_and_rebuild(&mut self, arena: &ItemArena) {
        self.current_mut().selected = 0;
        self.rebuild(arena);
    }

    /// The current (deepest) frame.
    #[must_use]
    pub fn current(&self) -> &Frame {
        // frames is never empty by construction
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Id of the stack the current frame views into, `None` at the root.
    #[must_use]
    pub fn parent_stack_id(&self) -> Option<&ItemId> {
        self.current().parent.as_ref()
    }

    /// Navigation depth; 1 at the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

impl Default for Nav {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentHash, ItemSnapshot};

    fn leaf(id: &str) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: "text/plain".to_string(),
            content_type: ContentType::Text,
            terse: format!("note {id}"),
            link: None,
            touched_at: 0,
            children: vec![],
        }
    }

    fn stack(id: &str, children: Vec<ItemSnapshot>) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: String::new(),
            content_type: ContentType::Stack,
            terse: format!("stack {id}"),
            link: None,
            touched_at: 0,
            children,
        }
    }

    fn arena_of(snaps: Vec<ItemSnapshot>) -> ItemArena {
        ItemArena::from_snapshot(&snaps).unwrap()
    }

    fn nav_over(arena: &ItemArena) -> Nav {
        let mut nav = Nav::new();
        nav.rebuild(arena);
        nav
    }

    #[test]
    fn move_selection_stays_in_bounds_and_composes() {
        let arena = arena_of((0..5).map(|i| leaf(&format!("i{i}"))).collect());
        let n = 5isize;

        for d1 in [-7isize, -1, 0, 1, 3, 12] {
            for d2 in [-5isize, 2, 9] {
                let mut a = nav_over(&arena);
                a.move_selection(d1);
                a.move_selection(d2);

                let mut b = nav_over(&arena);
                b.move_selection(d1 + d2);

                assert!(a.current().selected < 5);
                assert_eq!(
                    a.current().selected as isize,
                    (d1 + d2).rem_euclid(n),
                    "composition law failed for {d1}+{d2}"
                );
                assert_eq!(a.current().selected, b.current().selected);
            }
        }
    }

    #[test]
    fn move_selection_on_empty_is_a_safe_noop() {
        let arena = ItemArena::default();
        let mut nav = nav_over(&arena);

        nav.move_selection(1);
        nav.move_selection(-3);

        assert_eq!(nav.selected_id(), None);
        assert_eq!(nav.current().visible.len(), 0);
    }

    #[test]
    fn filter_change_rehomes_selection() {
        let arena = arena_of(vec![leaf("a"), leaf("b"), leaf("c")]);
        let mut nav = nav_over(&arena);

        nav.move_selection(2);
        assert_eq!(nav.current().selected, 2);

        nav.push_query_char('b', &arena);
        assert_eq!(nav.current().selected, 0);
        assert_eq!(nav.selected_id(), Some(&ItemId("b".into())));
    }

    #[test]
    fn type_filter_without_matches_yields_sentinel() {
        // the items are plain text; a Links filter hides everything
        let arena = arena_of(vec![leaf("a")]);
        let mut nav = nav_over(&arena);
        assert!(nav.selected_id().is_some());

        nav.set_type_filter(TypeFilter::Links, &arena);
        assert!(nav.current().visible.is_empty());
        assert_eq!(nav.selected_id(), None);
    }

    #[test]
    fn refresh_preserves_numeric_selection_clamped() {
        let arena = arena_of(vec![leaf("a"), leaf("b"), leaf("c"), leaf("d")]);
        let mut nav = nav_over(&arena);
        nav.move_selection(3);
        assert_eq!(nav.current().selected, 3);

        // shrink the listing: index clamps to the new end
        let smaller = arena_of(vec![leaf("a"), leaf("b")]);
        nav.rebuild(&smaller);
        assert_eq!(nav.current().selected, 1);
    }

    #[test]
    fn descend_and_ascend_walk_nested_stacks() {
        let arena = arena_of(vec![stack("s1", vec![leaf("a"), stack("s2", vec![leaf("b")])])]);
        let mut nav = nav_over(&arena);

        assert!(nav.descend(&arena));
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.parent_stack_id(), Some(&ItemId("s1".into())));
        assert_eq!(nav.selected_id(), Some(&ItemId("a".into())));

        nav.move_selection(1);
        assert!(nav.descend(&arena));
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.selected_id(), Some(&ItemId("b".into())));

        // leaf selected: descend refuses
        assert!(!nav.descend(&arena));

        assert!(nav.ascend(&arena));
        assert!(nav.ascend(&arena));
        assert_eq!(nav.depth(), 1);
        assert!(!nav.ascend(&arena));
    }

    #[test]
    fn vanished_parent_stack_pops_frames() {
        let arena = arena_of(vec![stack("s1", vec![leaf("a")])]);
        let mut nav = nav_over(&arena);
        nav.descend(&arena);
        assert_eq!(nav.depth(), 2);

        // backend refresh no longer carries the stack
        let refreshed = arena_of(vec![leaf("x")]);
        nav.rebuild(&refreshed);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.selected_id(), Some(&ItemId("x".into())));
    }
}
