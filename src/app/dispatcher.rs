//! Mode registry and key routing.
//!
//! The dispatcher owns one instance of every mode and the single
//! active-mode slot. Main is both the initial and the terminal state:
//! deactivating any mode lands on main, and deactivating while already on
//! main means "dismiss the whole surface", a host side effect rather than a state
//! transition.
//!
//! # Key routing
//!
//! Per key-down, strict priority, first match wins:
//!
//! 1. global shortcuts (exact modifier+key combinations);
//! 2. the active mode's hotkey table, then its own text input;
//! 3. the action registry, from the main browsing context;
//! 4. fallthrough: printable keys edit the main free-text filter.
//!
//! Routing itself performs no side effects beyond the one matched handler;
//! mode-transition effects ([`Effect::Enter`]/[`Effect::Leave`]) are
//! resolved here and never reach the host.

use crate::app::actions;
use crate::app::effects::{Effect, ModeIntent};
use crate::app::keys;
use crate::app::modes::{
    AddToStackMode, EditorMode, FilterMode, KeyHint, MainMode, Mode, ModeId, NewNoteMode,
    PaletteMode, PipeMode, SettingsMode, StackNameMode,
};
use crate::app::modes::stack_name::NameIntent;
use crate::app::state::AppState;
use crate::bridge::PipeStatus;
use crate::domain::ContentHash;
use crate::ui::viewmodel::OverlayView;
use crossterm::event::{KeyEvent, KeyEventKind};

/// Owns every mode and the active-mode slot.
pub struct Dispatcher {
    active: ModeId,
    main: MainMode,
    palette: PaletteMode,
    filter: FilterMode,
    add_to_stack: AddToStackMode,
    editor: EditorMode,
    new_note: NewNoteMode,
    pipe: PipeMode,
    settings: SettingsMode,
    stack_name: StackNameMode,
}

impl Dispatcher {
    /// A registry with every mode registered and main active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: ModeId::Main,
            main: MainMode,
            palette: PaletteMode::default(),
            filter: FilterMode::default(),
            add_to_stack: AddToStackMode::default(),
            editor: EditorMode::default(),
            new_note: NewNoteMode::default(),
            pipe: PipeMode::default(),
            settings: SettingsMode::default(),
            stack_name: StackNameMode::default(),
        }
    }

    /// Identity of the active mode.
    #[must_use]
    pub fn active(&self) -> ModeId {
        self.active
    }

    fn mode(&self, id: ModeId) -> &dyn Mode {
        match id {
            ModeId::Main => &self.main,
            ModeId::Palette => &self.palette,
            ModeId::Filter => &self.filter,
            ModeId::AddToStack => &self.add_to_stack,
            ModeId::Editor => &self.editor,
            ModeId::NewNote => &self.new_note,
            ModeId::Pipe => &self.pipe,
            ModeId::Settings => &self.settings,
            ModeId::StackName => &self.stack_name,
        }
    }

    fn mode_mut(&mut self, id: ModeId) -> &mut dyn Mode {
        match id {
            ModeId::Main => &mut self.main,
            ModeId::Palette => &mut self.palette,
            ModeId::Filter => &mut self.filter,
            ModeId::AddToStack => &mut self.add_to_stack,
            ModeId::Editor => &mut self.editor,
            ModeId::NewNote => &mut self.new_note,
            ModeId::Pipe => &mut self.pipe,
            ModeId::Settings => &mut self.settings,
            ModeId::StackName => &mut self.stack_name,
        }
    }

    /// Activates the mode an intent targets.
    ///
    /// The mode's `activate` hook runs first (its state writes must be
    /// visible to the first overlay render) and only then is the mode
    /// published as active. Hook effects (seed fetches) are returned for the
    /// host.
    pub fn activate(&mut self, app: &AppState, intent: ModeIntent) -> Vec<Effect> {
        let id = match intent {
            ModeIntent::Palette => ModeId::Palette,
            ModeIntent::Filter => ModeId::Filter,
            ModeIntent::AddToStack => ModeId::AddToStack,
            ModeIntent::Editor => ModeId::Editor,
            ModeIntent::NewNote => ModeId::NewNote,
            ModeIntent::Pipe => ModeId::Pipe,
            ModeIntent::Settings => ModeId::Settings,
            ModeIntent::RenameStack => {
                self.stack_name.set_intent(NameIntent::Rename);
                ModeId::StackName
            }
            ModeIntent::NewStack => {
                self.stack_name.set_intent(NameIntent::Create);
                ModeId::StackName
            }
        };

        tracing::debug!(mode = ?id, "activating mode");
        let hook_effects = self.mode_mut(id).activate(app);
        self.active = id;
        hook_effects
    }

    /// Deactivate-if-active, activate otherwise.
    pub fn toggle(&mut self, app: &AppState, intent: ModeIntent) -> Vec<Effect> {
        let target = match intent {
            ModeIntent::Palette => ModeId::Palette,
            ModeIntent::Filter => ModeId::Filter,
            ModeIntent::AddToStack => ModeId::AddToStack,
            ModeIntent::Editor => ModeId::Editor,
            ModeIntent::NewNote => ModeId::NewNote,
            ModeIntent::Pipe => ModeId::Pipe,
            ModeIntent::Settings => ModeId::Settings,
            ModeIntent::RenameStack | ModeIntent::NewStack => ModeId::StackName,
        };
        if self.active == target {
            self.deactivate()
        } else {
            self.activate(app, intent)
        }
    }

    /// Returns to main; from main, emits the dismiss-surface effect.
    ///
    /// Never mutates item state.
    pub fn deactivate(&mut self) -> Vec<Effect> {
        if self.active == ModeId::Main {
            tracing::debug!("deactivate on main: dismissing surface");
            vec![Effect::DismissSurface]
        } else {
            tracing::debug!(from = ?self.active, "deactivating to main");
            self.active = ModeId::Main;
            vec![]
        }
    }

    /// Routes one key event. Returns whether the UI should re-render and the
    /// host effects to execute.
    pub fn route_key(&mut self, app: &mut AppState, key: &KeyEvent) -> (bool, Vec<Effect>) {
        if key.kind == KeyEventKind::Release {
            return (false, vec![]);
        }

        let _span = tracing::debug_span!("route_key", active = ?self.active).entered();

        // 1. global shortcuts
        if let Some(effects) = self.route_global(app, key) {
            return (true, effects);
        }

        // 2. active mode
        let active = self.active;
        if let Some(effects) = self.mode_mut(active).handle_key(app, key) {
            let resolved = self.resolve(app, effects);
            return (true, resolved);
        }

        if self.active == ModeId::Main {
            // 3. action registry
            if let Some(effects) = actions::attempt_action(app, key) {
                let resolved = self.resolve(app, effects);
                return (true, resolved);
            }

            // 4. everything else is a filter keystroke
            if let Some(c) = keys::printable(key) {
                app.push_filter_char(c);
                return (true, vec![]);
            }
        }

        (false, vec![])
    }

    /// Global shortcuts, independent of the active mode.
    fn route_global(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if keys::ctrl(key, 'k') {
            return Some(self.toggle(app, ModeIntent::Palette));
        }
        if keys::ctrl(key, 'f') {
            return Some(self.toggle(app, ModeIntent::Filter));
        }
        if keys::ctrl(key, ',') {
            return Some(self.toggle(app, ModeIntent::Settings));
        }
        if keys::ctrl_shift(key, 'o') {
            return Some(self.activate(app, ModeIntent::NewStack));
        }
        if keys::ctrl(key, 'o') {
            return Some(self.activate(app, ModeIntent::NewNote));
        }
        if keys::ctrl(key, 's') {
            // add-to-stack needs something groupable under the cursor
            if app.selected_item().is_some_and(|item| !item.is_stack()) {
                return Some(self.activate(app, ModeIntent::AddToStack));
            }
            return Some(vec![]);
        }
        None
    }

    /// Resolves mode-transition effects in order, passing everything else
    /// through to the host.
    fn resolve(&mut self, app: &AppState, effects: Vec<Effect>) -> Vec<Effect> {
        let mut host_effects = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Enter(intent) => {
                    host_effects.extend(self.activate(app, intent));
                }
                Effect::Leave => {
                    host_effects.extend(self.deactivate());
                }
                other => host_effects.push(other),
            }
        }
        host_effects
    }

    /// Streams a pipe execution status into the pipe mode.
    ///
    /// Returns whether displayed state changed (stale ids are dropped).
    pub fn apply_pipe_status(&mut self, status: &PipeStatus) -> bool {
        self.pipe.apply_status(status)
    }

    /// Feeds a raw-content answer to the editor.
    pub fn apply_raw_content(&mut self, hash: &ContentHash, body: &str) {
        self.editor.apply_raw_content(hash, body);
    }

    /// Display name of the active mode.
    #[must_use]
    pub fn mode_name(&self, app: &AppState) -> String {
        self.mode(self.active).name(app)
    }

    /// Footer hints of the active mode.
    #[must_use]
    pub fn key_hints(&self, app: &AppState) -> Vec<KeyHint> {
        self.mode(self.active).key_hints(app)
    }

    /// Overlay of the active mode, `None` on main.
    #[must_use]
    pub fn overlay(&self, app: &AppState) -> Option<OverlayView> {
        self.mode(self.active).overlay(app)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::rc::Rc;

    fn app() -> AppState {
        AppState::new(Rc::new(NullBridge), 16)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn toggle_twice_returns_to_main() {
        let app = app();
        let mut dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.active(), ModeId::Main);

        dispatcher.toggle(&app, ModeIntent::Palette);
        assert_eq!(dispatcher.active(), ModeId::Palette);

        dispatcher.toggle(&app, ModeIntent::Palette);
        assert_eq!(dispatcher.active(), ModeId::Main);
    }

    #[test]
    fn activate_hook_runs_before_publication() {
        // palette options must be populated on the very first overlay render
        let app = app();
        let mut dispatcher = Dispatcher::new();

        dispatcher.toggle(&app, ModeIntent::Palette);
        let overlay = dispatcher.overlay(&app).expect("palette overlay");
        // with no selection, the always-applicable actions remain
        assert!(!overlay.options.is_empty());
        let labels: Vec<&str> = overlay.options.iter().map(|o| o.label.as_str()).collect();
        assert!(labels.contains(&"New note"));
        assert!(!labels.contains(&"Copy"));
    }

    #[test]
    fn deactivate_from_main_dismisses_surface() {
        let mut app = app();
        let mut dispatcher = Dispatcher::new();

        let (_, effects) = dispatcher.route_key(&mut app, &key(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(effects, vec![Effect::DismissSurface]);
        assert_eq!(dispatcher.active(), ModeId::Main);
    }

    #[test]
    fn escape_clears_filter_before_dismissing() {
        let mut app = app();
        let mut dispatcher = Dispatcher::new();

        // typed characters fall through to the filter box
        dispatcher.route_key(&mut app, &key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.nav.filter().query, "x");

        let (_, effects) = dispatcher.route_key(&mut app, &key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(effects.is_empty());
        assert!(app.nav.filter().query.is_empty());

        let (_, effects) = dispatcher.route_key(&mut app, &key(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(effects, vec![Effect::DismissSurface]);
    }

    #[test]
    fn global_shortcut_wins_over_mode_and_actions() {
        let mut app = app();
        let mut dispatcher = Dispatcher::new();

        let (render, _) =
            dispatcher.route_key(&mut app, &key(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(render);
        assert_eq!(dispatcher.active(), ModeId::Palette);

        // while the palette is open, plain characters feed its query,
        // not the main filter
        dispatcher.route_key(&mut app, &key(KeyCode::Char('z'), KeyModifiers::NONE));
        assert!(app.nav.filter().query.is_empty());
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut app = app();
        let mut dispatcher = Dispatcher::new();

        let mut release = key(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        let (render, effects) = dispatcher.route_key(&mut app, &release);
        assert!(!render);
        assert!(effects.is_empty());
        assert!(app.nav.filter().query.is_empty());
    }
}
