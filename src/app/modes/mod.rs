//! Mode implementations and the polymorphic mode interface.
//!
//! Every interactive workflow is one [`Mode`]: a named unit with its own
//! local state, hotkey table, activation hook, and overlay view. Exactly one
//! mode is active at a time (enforced by the
//! [`Dispatcher`](crate::app::dispatcher::Dispatcher)); the main browse mode
//! is the rest state every other mode deactivates back into.
//!
//! All modes implement the same interface; there is deliberately no
//! structural special-casing per mode. Modes that need entry parameters
//! (pipe source, rename-vs-create intent) read them from state or have them
//! set by the dispatcher before their `activate` hook runs.

pub mod add_to_stack;
pub mod chooser;
pub mod editor;
pub mod filter;
pub mod main;
pub mod new_note;
pub mod palette;
pub mod pipe;
pub mod settings;
pub mod stack_name;

pub use add_to_stack::AddToStackMode;
pub use editor::EditorMode;
pub use filter::FilterMode;
pub use main::MainMode;
pub use new_note::NewNoteMode;
pub use palette::PaletteMode;
pub use pipe::PipeMode;
pub use settings::SettingsMode;
pub use stack_name::StackNameMode;

use crate::app::effects::Effect;
use crate::app::state::AppState;
use crate::ui::viewmodel::OverlayView;
use crossterm::event::KeyEvent;

/// Identity of a registered mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeId {
    Main,
    Palette,
    Filter,
    AddToStack,
    Editor,
    NewNote,
    Pipe,
    Settings,
    StackName,
}

/// Display entry for the footer key-hint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub name: &'static str,
    pub keys: &'static str,
}

/// One entry of a mode's hotkey table.
///
/// `matches` is optional: entries without a key predicate are not reachable
/// from keyboard routing (they exist for display, or are click-driven) and
/// are skipped by [`route`].
pub struct HotKey<M: ?Sized> {
    pub name: &'static str,
    pub keys: &'static str,
    pub matches: Option<fn(&KeyEvent) -> bool>,
    pub run: fn(&mut M, &mut AppState) -> Vec<Effect>,
}

/// Scans a hotkey table in order and fires the first matching entry.
pub(crate) fn route<M>(
    mode: &mut M,
    table: &[HotKey<M>],
    app: &mut AppState,
    key: &KeyEvent,
) -> Option<Vec<Effect>> {
    for entry in table {
        let Some(matches) = entry.matches else {
            continue;
        };
        if matches(key) {
            tracing::debug!(hotkey = entry.name, "mode hotkey matched");
            return Some((entry.run)(mode, app));
        }
    }
    None
}

/// Footer hints derived from a hotkey table.
pub(crate) fn hints<M>(table: &[HotKey<M>]) -> Vec<KeyHint> {
    table
        .iter()
        .map(|entry| KeyHint {
            name: entry.name,
            keys: entry.keys,
        })
        .collect()
}

/// The polymorphic mode interface.
///
/// `activate` runs before the dispatcher publishes the mode as active, so
/// the first overlay render always sees fully-initialized mode state. It may
/// return effects (typically bridge fetches seeding the mode).
pub trait Mode {
    fn id(&self) -> ModeId;

    /// Display name; may be dynamic (the pipe mode embeds its last exit
    /// code).
    fn name(&self, app: &AppState) -> String;

    /// Footer hints for the active mode.
    fn key_hints(&self, app: &AppState) -> Vec<KeyHint>;

    /// Entry hook: seed mode-local state from current app state.
    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        let _ = app;
        Vec::new()
    }

    /// Keyboard handling: hotkey table first, then any free-text input the
    /// mode owns. `None` means unhandled (routing continues).
    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>>;

    /// Overlay view model, for modes that draw over the list.
    fn overlay(&self, app: &AppState) -> Option<OverlayView> {
        let _ = app;
        None
    }
}
