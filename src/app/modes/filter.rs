//! Content-type filter mode.
//!
//! Narrow picker over the filter variants. Applying a choice re-homes the
//! listing selection to the first visible item (the model enforces that).

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::chooser::Chooser;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::stack::TypeFilter;
use crate::ui::viewmodel::{OverlayOption, OverlayView};
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct FilterMode {
    options: Chooser<TypeFilter>,
}

static TABLE: &[HotKey<FilterMode>] = &[
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
        name: "Apply",
        keys: "Enter",
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: |mode, app| {
            if let Some(kind) = mode.options.selected_payload().copied() {
                app.set_type_filter(kind);
            }
            vec![Effect::Leave]
        },
    },
    HotKey {
        name: "Close",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl Mode for FilterMode {
    fn id(&self) -> ModeId {
        ModeId::Filter
    }

    fn name(&self, _app: &AppState) -> String {
        "Filter by type".to_string()
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        let entries = TypeFilter::ALL
            .iter()
            .map(|kind| (kind.label().to_string(), *kind))
            .collect();
        self.options.seed(entries);

        let current = app.nav.filter().kind;
        self.options.preselect_by(|kind| *kind == current);
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
            .map(|(label, _, highlights)| OverlayOption {
                label: label.to_string(),
                hint: None,
                highlights,
            })
            .collect();

        Some(OverlayView {
            title: "Filter by type".to_string(),
            input: Some(self.options.query().to_string()),
            options,
            selected: self.options.selected_index(),
            status: None,
        })
    }
}
