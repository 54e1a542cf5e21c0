//! Invocation call types for the backend bridge.
//!
//! Every mutation or query the frontend sends to the native backend is one
//! [`BridgeCall`] variant. Calls serialize as `{"method": ..., "args": ...}`
//! with snake_case method names, matching the backend's RPC surface. All
//! calls are fire-and-forget from the frontend's point of view: results and
//! follow-up state arrive as push events, never as return values.

use crate::domain::{ContentHash, ItemId};
use serde::{Deserialize, Serialize};

/// Theme mode forwarded to the backend, which owns the window chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Cycles light → dark → system → light. Used by the settings mode.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

/// User-tunable settings persisted by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Window theme mode.
    #[serde(default)]
    pub theme_mode: ThemeMode,

    /// Whether newly created notes grab selection focus.
    #[serde(default)]
    pub focus_new_notes: bool,
}

/// One invocation of the backend bridge.
///
/// Serialized form is method-name + named-args:
///
/// ```json
/// {"method": "store_add_to_stack", "args": {"stack_id": "…", "source_id": "…"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "args", rename_all = "snake_case")]
pub enum BridgeCall {
    /// Requests the initial navigation snapshot; the backend answers on the
    /// `recent-items` topic.
    InitWindow,

    /// Resolves a content hash to its rendered body; answers on `content` or
    /// `content-error`.
    StoreGetContent { hash: ContentHash },

    /// Resolves a content hash to its raw, unrendered body; answers on
    /// `raw-content`. Used by the editor.
    StoreGetRawContent { hash: ContentHash },

    /// Writes every child of a stack to the system clipboard in order.
    StoreCopyEntireStackToClipboard { stack_hash: ContentHash },

    /// Deletes a capture; `stack_hash` scopes the delete to one stack when
    /// the item is viewed inside it.
    StoreDelete {
        hash: ContentHash,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack_hash: Option<ContentHash>,
    },

    /// Adds an existing capture to an existing stack.
    StoreAddToStack { stack_id: ItemId, source_id: ItemId },

    /// Creates a stack with the given name and adds a capture to it.
    StoreAddToNewStack { name: String, source_id: ItemId },

    /// Creates an empty named stack.
    StoreNewStack { name: String },

    /// Creates a note, optionally inside a stack.
    StoreNewNote {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack_id: Option<ItemId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        should_focus: Option<bool>,
    },

    /// Replaces the content of an editable capture. Also used to rename a
    /// stack: the backend stores a stack's name as its note body.
    StoreEditNote { source_id: ItemId, content: String },

    /// Captures content as a fresh top-of-history item.
    StoreCapture {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        source_id: Option<ItemId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack_name: Option<String>,
    },

    /// Pipes a capture's content through a shell command. Status arrives on
    /// `pipe-to-shell`, tagged with `exec_id`.
    StorePipeToCommand {
        exec_id: u64,
        source_id: ItemId,
        command: String,
    },

    /// Persists the settings blob.
    StoreSettingsSave { settings: Settings },

    /// Switches the window theme mode.
    StoreSetThemeMode { mode: ThemeMode },
}

impl BridgeCall {
    /// The wire method name, for logging.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::InitWindow => "init_window",
            Self::StoreGetContent { .. } => "store_get_content",
            Self::StoreGetRawContent { .. } => "store_get_raw_content",
            Self::StoreCopyEntireStackToClipboard { .. } => {
                "store_copy_entire_stack_to_clipboard"
            }
            Self::StoreDelete { .. } => "store_delete",
            Self::StoreAddToStack { .. } => "store_add_to_stack",
            Self::StoreAddToNewStack { .. } => "store_add_to_new_stack",
            Self::StoreNewStack { .. } => "store_new_stack",
            Self::StoreNewNote { .. } => "store_new_note",
            Self::StoreEditNote { .. } => "store_edit_note",
            Self::StoreCapture { .. } => "store_capture",
            Self::StorePipeToCommand { .. } => "store_pipe_to_command",
            Self::StoreSettingsSave { .. } => "store_settings_save",
            Self::StoreSetThemeMode { .. } => "store_set_theme_mode",
        }
    }
}
