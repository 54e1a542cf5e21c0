//! Effects: side-effect commands produced by event handling.
//!
//! Event handling never performs a side effect inline. Handlers mutate state
//! and return [`Effect`] values; the dispatcher resolves the mode-transition
//! effects itself and everything else is handed to the host shim, which owns
//! the clipboard, the window surface, and the bridge transport. This keeps
//! the whole routing path assertable in tests.

use crate::bridge::BridgeCall;

/// Which mode a transition effect targets.
///
/// Intents are requests, not mode identities: the stack-name mode serves two
/// intents (rename vs. create) and resolves the difference at activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeIntent {
    Palette,
    Filter,
    AddToStack,
    Editor,
    NewNote,
    Pipe,
    Settings,
    RenameStack,
    NewStack,
}

/// A side effect to execute after event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invoke a backend bridge call (fire-and-forget).
    Invoke(BridgeCall),

    /// Write a resolved content string to the system clipboard.
    CopyClipboard(String),

    /// Open a URL in the host browser.
    OpenUrl(String),

    /// Hide the whole UI surface.
    ///
    /// Emitted on deactivate-from-main and after a successful copy.
    DismissSurface,

    /// Activate a mode. Resolved by the dispatcher, never reaches the host.
    Enter(ModeIntent),

    /// Deactivate the current mode (back to main, or dismiss from main).
    /// Resolved by the dispatcher, never reaches the host.
    Leave,
}
