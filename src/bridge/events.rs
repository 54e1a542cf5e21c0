//! Push-event payloads delivered by the backend.
//!
//! The backend publishes on named topics; the host shim subscribes once and
//! forwards every delivery into [`handle_event`](crate::app::handle_event).
//! Per-topic emission order is preserved by the host loop and the frontend
//! applies payloads strictly in receipt order.

use crate::domain::ContentHash;
use serde::{Deserialize, Serialize};

/// Topic carrying full item-listing snapshots.
pub const TOPIC_RECENT_ITEMS: &str = "recent-items";

/// Topic carrying pipe-to-shell execution status updates.
pub const TOPIC_PIPE_TO_SHELL: &str = "pipe-to-shell";

/// Topic carrying resolved content bodies (answers to `store_get_content`).
pub const TOPIC_CONTENT: &str = "content";

/// Topic carrying content resolution failures.
pub const TOPIC_CONTENT_ERROR: &str = "content-error";

/// Topic carrying raw content bodies (answers to `store_get_raw_content`).
pub const TOPIC_RAW_CONTENT: &str = "raw-content";

/// A resolved (or failed) content lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    /// Hash the lookup was issued for.
    pub hash: ContentHash,

    /// Resolved body; absent on the error topic.
    #[serde(default)]
    pub content: Option<String>,
}

/// Partial status of one pipe-to-shell execution.
///
/// The backend streams these as the command produces output and exits. The
/// `exec_id` echoes the client-generated id from
/// [`BridgeCall::StorePipeToCommand`](crate::bridge::BridgeCall); receivers
/// drop any status whose id is not the most recently issued one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeStatus {
    pub exec_id: u64,

    /// Accumulated stdout, if any yet.
    #[serde(default)]
    pub out: Option<String>,

    /// Accumulated stderr, if any yet.
    #[serde(default)]
    pub err: Option<String>,

    /// Exit code; present once the command finished.
    #[serde(default)]
    pub code: Option<i32>,
}
