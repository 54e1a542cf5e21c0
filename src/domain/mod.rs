//! Core domain types: items, stacks-of-items, and errors.
//!
//! The domain layer has no knowledge of modes, key routing, or the bridge.
//! It owns the item arena (the flattened form of the backend's nested
//! snapshots) and the crate-wide error type.

pub mod error;
pub mod item;

pub use error::{ClipstackError, Result};
pub use item::{ContentHash, ContentType, Item, ItemArena, ItemId, ItemSnapshot, LinkMeta};
