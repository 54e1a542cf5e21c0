//! Item domain model and the id-keyed item arena.
//!
//! This module defines the core [`Item`] type representing one captured
//! clipboard artifact or one stack of such artifacts, plus the [`ItemArena`]
//! that owns every item by id. Child relationships are stored as id lists
//! referencing other arena entries rather than nested ownership, which keeps
//! recursive stack-of-stacks structures flat and makes cycle validation
//! straightforward on ingest.
//!
//! Items are read-only views of backend state: the backend pushes refreshed
//! snapshots wholesale and the UI never mutates an item field by field.

use crate::domain::error::{ClipstackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Stable identifier of a captured item.
///
/// Ids are opaque strings minted by the backend. They are time-orderable:
/// lexicographic order equals capture order, which is all the frontend ever
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash pointing into the backend's content-addressed store.
///
/// The key space of the [`ContentCache`](crate::cache::ContentCache). A hash
/// always resolves to the same bytes, so cached bodies never need
/// invalidation, only bounding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(pub String);

impl ContentHash {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content-type tag of an item.
///
/// `Stack` is structural: an item is a stack exactly when it owns a non-empty
/// child sequence, and stacks have no MIME type of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    Text,
    Image,
    Link,
    Stack,
}

/// Link metadata attached to items captured from URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMeta {
    /// Site/provider name, e.g. "github".
    #[serde(default)]
    pub provider: Option<String>,

    /// Content hash of a page screenshot, if the backend captured one.
    #[serde(default)]
    pub screenshot: Option<ContentHash>,

    /// Page title.
    #[serde(default)]
    pub title: Option<String>,

    /// Page description / og:description.
    #[serde(default)]
    pub description: Option<String>,

    /// The captured URL.
    pub url: String,
}

/// One captured clipboard artifact, or one stack of artifacts.
///
/// Immutable per version: the backend replaces items wholesale on every
/// snapshot push. Stack membership is expressed through `children`, a list of
/// arena ids; the invariant `content_type == Stack` iff `!children.is_empty()`
/// is enforced on ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable identifier.
    pub id: ItemId,

    /// Historical capture ids, ordered oldest to newest. Every re-copy of the
    /// same content appends an id here.
    pub touched: Vec<ItemId>,

    /// Pointer into the content-addressed store.
    pub hash: ContentHash,

    /// MIME type of the content. Empty for stacks.
    pub mime_type: String,

    /// Content-type tag.
    pub content_type: ContentType,

    /// Denormalized short preview string for list rows.
    pub terse: String,

    /// Link metadata, present only for `Link` items.
    pub link: Option<LinkMeta>,

    /// Unix timestamp of the most recent capture of this item.
    pub touched_at: i64,

    /// Ordered child ids. Non-empty exactly when `content_type == Stack`.
    pub children: Vec<ItemId>,
}

impl Item {
    /// Whether this item groups other items.
    #[must_use]
    pub fn is_stack(&self) -> bool {
        self.content_type == ContentType::Stack
    }

    /// Returns a human-readable string describing how long ago the item was
    /// last captured.
    ///
    /// The format varies with elapsed time: "just now", "5m ago", "3h ago",
    /// "7d ago".
    #[must_use]
    pub fn time_ago(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let diff = now - self.touched_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

/// Wire form of an item as the backend pushes it: nested, children inline.
///
/// Flattened into the [`ItemArena`] on ingest. Kept separate from [`Item`] so
/// the in-memory model never carries nested ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ItemId,

    #[serde(default)]
    pub touched: Vec<ItemId>,

    pub hash: ContentHash,

    #[serde(default)]
    pub mime_type: String,

    pub content_type: ContentType,

    pub terse: String,

    #[serde(default)]
    pub link: Option<LinkMeta>,

    #[serde(default)]
    pub touched_at: i64,

    #[serde(default)]
    pub children: Vec<ItemSnapshot>,
}

/// Id-keyed arena owning every item of the current backend snapshot.
///
/// The root order is the backend's listing order (newest first). Child lists
/// reference other arena entries by id, so nested stack browsing is a lookup,
/// not a traversal of owned subtrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemArena {
    items: HashMap<ItemId, Item>,
    roots: Vec<ItemId>,
}

impl ItemArena {
    /// Builds an arena from a backend snapshot listing.
    ///
    /// Validates, per item: a `Stack` content type requires a non-empty child
    /// sequence and vice versa, and no stack may (transitively) contain
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns [`ClipstackError::Snapshot`] naming the offending item when an
    /// invariant is violated. On error the arena under construction is
    /// discarded; callers keep their previous state.
    pub fn from_snapshot(snapshot: &[ItemSnapshot]) -> Result<Self> {
        let _span = tracing::debug_span!("arena_ingest", root_count = snapshot.len()).entered();

        let mut arena = Self::default();
        let mut ancestors = Vec::new();
        for snap in snapshot {
            let id = arena.insert_snapshot(snap, &mut ancestors)?;
            arena.roots.push(id);
        }

        tracing::debug!(item_count = arena.items.len(), "snapshot ingested");
        Ok(arena)
    }

    fn insert_snapshot(
        &mut self,
        snap: &ItemSnapshot,
        ancestors: &mut Vec<ItemId>,
    ) -> Result<ItemId> {
        if ancestors.contains(&snap.id) {
            return Err(ClipstackError::Snapshot(format!(
                "stack {} transitively contains itself",
                snap.id
            )));
        }

        let is_stack = snap.content_type == ContentType::Stack;
        if is_stack && snap.children.is_empty() {
            return Err(ClipstackError::Snapshot(format!(
                "stack {} has no children",
                snap.id
            )));
        }
        if !is_stack && !snap.children.is_empty() {
            return Err(ClipstackError::Snapshot(format!(
                "non-stack {} carries children",
                snap.id
            )));
        }

        ancestors.push(snap.id.clone());
        let mut child_ids = Vec::with_capacity(snap.children.len());
        for child in &snap.children {
            child_ids.push(self.insert_snapshot(child, ancestors)?);
        }
        ancestors.pop();

        let item = Item {
            id: snap.id.clone(),
            touched: snap.touched.clone(),
            hash: snap.hash.clone(),
            mime_type: snap.mime_type.clone(),
            content_type: snap.content_type,
            terse: snap.terse.clone(),
            link: snap.link.clone(),
            touched_at: snap.touched_at,
            children: child_ids,
        };
        let id = item.id.clone();
        self.items.insert(id.clone(), item);
        Ok(id)
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// The backend's top-level listing order.
    #[must_use]
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// Child ids of an item; empty for non-stacks and unknown ids.
    #[must_use]
    pub fn children_of(&self, id: &ItemId) -> &[ItemId] {
        self.items.get(id).map_or(&[], |item| item.children.as_slice())
    }

    /// All top-level stack items, in listing order.
    ///
    /// Used by the add-to-stack mode to offer grouping targets.
    #[must_use]
    pub fn root_stacks(&self) -> Vec<&Item> {
        self.roots
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|item| item.is_stack())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![ItemId(id.to_string())],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: "text/plain".to_string(),
            content_type: ContentType::Text,
            terse: format!("item {id}"),
            link: None,
            touched_at: 0,
            children: vec![],
        }
    }

    fn stack(id: &str, children: Vec<ItemSnapshot>) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![ItemId(id.to_string())],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: String::new(),
            content_type: ContentType::Stack,
            terse: format!("stack {id}"),
            link: None,
            touched_at: 0,
            children,
        }
    }

    #[test]
    fn ingest_flattens_nested_stacks() {
        let snapshot = vec![stack("s1", vec![leaf("a"), stack("s2", vec![leaf("b")])]), leaf("c")];
        let arena = ItemArena::from_snapshot(&snapshot).unwrap();

        assert_eq!(arena.len(), 5);
        assert_eq!(arena.roots().len(), 2);
        assert_eq!(arena.children_of(&ItemId("s1".into())).len(), 2);
        assert_eq!(arena.children_of(&ItemId("s2".into())), &[ItemId("b".into())]);
        assert_eq!(arena.children_of(&ItemId("a".into())), &[] as &[ItemId]);
    }

    #[test]
    fn ingest_rejects_empty_stack() {
        let snapshot = vec![stack("s1", vec![])];
        let err = ItemArena::from_snapshot(&snapshot).unwrap_err();
        assert!(err.to_string().contains("no children"));
    }

    #[test]
    fn ingest_rejects_children_on_non_stack() {
        let mut bad = leaf("a");
        bad.children = vec![leaf("b")];
        let err = ItemArena::from_snapshot(&[bad]).unwrap_err();
        assert!(err.to_string().contains("carries children"));
    }

    #[test]
    fn ingest_rejects_self_containing_stack() {
        let snapshot = vec![stack("s1", vec![stack("s1", vec![leaf("a")])])];
        let err = ItemArena::from_snapshot(&snapshot).unwrap_err();
        assert!(err.to_string().contains("contains itself"));
    }

    #[test]
    fn root_stacks_skips_plain_items() {
        let snapshot = vec![leaf("a"), stack("s1", vec![leaf("b")])];
        let arena = ItemArena::from_snapshot(&snapshot).unwrap();
        let stacks = arena.root_stacks();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].id, ItemId("s1".into()));
    }

    #[test]
    fn time_ago_buckets() {
        let now = chrono::Utc::now().timestamp();
        let mut item = Item {
            id: ItemId("a".into()),
            touched: vec![],
            hash: ContentHash("sha256-a".into()),
            mime_type: "text/plain".into(),
            content_type: ContentType::Text,
            terse: "a".into(),
            link: None,
            touched_at: now,
            children: vec![],
        };
        assert_eq!(item.time_ago(), "just now");

        item.touched_at = now - 5 * 60;
        assert_eq!(item.time_ago(), "5m ago");

        item.touched_at = now - 3 * 3600;
        assert_eq!(item.time_ago(), "3h ago");

        item.touched_at = now - 7 * 86400;
        assert_eq!(item.time_ago(), "7d ago");
    }
}
