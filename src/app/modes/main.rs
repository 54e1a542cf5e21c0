//! Main browse mode: the rest state of the mode machine.
//!
//! Navigation over the current listing, drill-in/out of stacks, and the
//! escape hatch. Everything else the user does from here is routed past this
//! table: unmatched keys fall through to the action registry and then to the
//! free-text filter (handled by the dispatcher).

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct MainMode;

static TABLE: &[HotKey<MainMode>] = &[
    HotKey {
        name: "Next",
        keys: "Down",
        matches: Some(|key| {
            keys::plain(key, KeyCode::Down) || keys::ctrl(key, 'n')
        }),
        run: |_, app| {
            app.nav.move_selection(1);
            vec![]
        },
    },
    HotKey {
        name: "Previous",
        keys: "Up",
        matches: Some(|key| keys::plain(key, KeyCode::Up) || keys::ctrl(key, 'p')),
        run: |_, app| {
            app.nav.move_selection(-1);
            vec![]
        },
    },
    HotKey {
        name: "Open stack",
        keys: "Right",
        matches: Some(|key| keys::plain(key, KeyCode::Right)),
        run: |_, app| {
            app.descend();
            vec![]
        },
    },
    HotKey {
        name: "Back",
        keys: "Left",
        matches: Some(|key| keys::plain(key, KeyCode::Left)),
        run: |_, app| {
            app.ascend();
            vec![]
        },
    },
    HotKey {
        name: "Clear / dismiss",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, app| {
            // Esc clears an active filter first; a second press dismisses
            if app.clear_filter() {
                vec![]
            } else {
                vec![Effect::Leave]
            }
        },
    },
    HotKey {
        name: "Erase filter",
        keys: "Backspace",
        matches: Some(|key| keys::plain(key, KeyCode::Backspace)),
        run: |_, app| {
            app.pop_filter_char();
            vec![]
        },
    },
];

impl Mode for MainMode {
    fn id(&self) -> ModeId {
        ModeId::Main
    }

    fn name(&self, app: &AppState) -> String {
        app.parent_stack()
            .map_or_else(|| "Recent".to_string(), |stack| stack.terse.clone())
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        route(self, TABLE, app, key)
    }
}
