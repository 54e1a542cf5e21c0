//! Action palette: fuzzy-searchable list of the currently applicable
//! actions.
//!
//! The option list is snapshotted by the `activate` hook, so the first
//! overlay render already shows it. Selecting an entry re-checks
//! applicability through the registry's by-name path (selection may have
//! changed while the palette was open) and replays the action's effects.

use crate::app::actions::{self, ActionDef};
use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::chooser::Chooser;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::ui::viewmodel::{OverlayOption, OverlayView};
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct PaletteMode {
    options: Chooser<&'static ActionDef>,
}

static TABLE: &[HotKey<PaletteMode>] = &[
    HotKey {
        name: "Next",
        keys: "Down",
        matches: Some(|key| keys::plain(key, KeyCode::Down) || keys::ctrl(key, 'n')),
        run: |mode, _| {
            mode.options.move_selection(1);
            vec![]
        },
    },
    HotKey {
        name: "Previous",
        keys: "Up",
        matches: Some(|key| keys::plain(key, KeyCode::Up) || keys::ctrl(key, 'p')),
        run: |mode, _| {
            mode.options.move_selection(-1);
            vec![]
        },
    },
    HotKey {
        name: "Trigger",
        keys: "Enter",
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: PaletteMode::trigger_selected,
    },
    HotKey {
        name: "Close",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl PaletteMode {
    fn trigger_selected(&mut self, app: &mut AppState) -> Vec<Effect> {
        let Some(action) = self.options.selected_payload() else {
            return vec![Effect::Leave];
        };
        let name = action.name;

        // leave first: an action that enters another mode must land there,
        // not get clobbered by the palette's own deactivation
        let mut effects = vec![Effect::Leave];
        if let Some(triggered) = actions::attempt_action_by_name(app, name) {
            effects.extend(triggered);
        }
        effects
    }
}

impl Mode for PaletteMode {
    fn id(&self) -> ModeId {
        ModeId::Palette
    }

    fn name(&self, _app: &AppState) -> String {
        "Actions".to_string()
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        let entries = actions::applicable_actions(app)
            .into_iter()
            .map(|action| (action.name.to_string(), action))
            .collect();
        self.options.seed(entries);
        vec![]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if let Some(effects) = route(self, TABLE, app, key) {
            return Some(effects);
        }
        if keys::plain(key, KeyCode::Backspace) {
            self.options.pop_char();
            return Some(vec![]);
        }
        keys::printable(key).map(|c| {
            self.options.push_char(c);
            vec![]
        })
    }

    fn overlay(&self, _app: &AppState) -> Option<OverlayView> {
        let options = self
            .options
            .visible_options()
            .into_iter()
            .map(|(label, action, highlights)| OverlayOption {
                label: label.to_string(),
                hint: Some(action.keys.to_string()),
                highlights,
            })
            .collect();

        Some(OverlayView {
            title: "Actions".to_string(),
            input: Some(self.options.query().to_string()),
            options,
            selected: self.options.selected_index(),
            status: None,
        })
    }
}
