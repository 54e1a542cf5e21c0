//! Settings mode.
//!
//! Edits a draft copy of the settings snapshotted at activation; nothing is
//! persisted until Ctrl+Enter sends the draft to the backend. The theme mode
//! switch is forwarded separately so the window chrome updates immediately.

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::bridge::{BridgeCall, Settings};
use crate::ui::viewmodel::{OverlayOption, OverlayView};
use crossterm::event::{KeyCode, KeyEvent};

/// Number of settings rows (theme mode, focus-new-notes).
const ENTRY_COUNT: usize = 2;

#[derive(Debug, Default)]
pub struct SettingsMode {
    draft: Settings,
    selected: usize,
}

static TABLE: &[HotKey<SettingsMode>] = &[
    HotKey {
        name: "Next",
        keys: "Down",
        matches: Some(|key| keys::plain(key, KeyCode::Down) || keys::ctrl(key, 'n')),
        run: |mode, _| {
            mode.selected = (mode.selected + 1) % ENTRY_COUNT;
            vec![]
        },
    },
    HotKey {
        name: "Previous",
        keys: "Up",
        matches: Some(|key| keys::plain(key, KeyCode::Up) || keys::ctrl(key, 'p')),
        run: |mode, _| {
            mode.selected = (mode.selected + ENTRY_COUNT - 1) % ENTRY_COUNT;
            vec![]
        },
    },
    HotKey {
        name: "Change",
        keys: "Enter",
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: |mode, _| {
            mode.cycle_selected();
            vec![]
        },
    },
    HotKey {
        name: "Save",
        keys: "Ctrl+Enter",
        matches: Some(|key| keys::ctrl_code(key, KeyCode::Enter)),
        run: SettingsMode::save,
    },
    HotKey {
        name: "Close",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl SettingsMode {
    fn cycle_selected(&mut self) {
        match self.selected {
            0 => self.draft.theme_mode = self.draft.theme_mode.next(),
            _ => self.draft.focus_new_notes = !self.draft.focus_new_notes,
        }
    }

    fn save(&mut self, app: &mut AppState) -> Vec<Effect> {
        let mut effects = vec![Effect::Leave];
        if self.draft.theme_mode != app.settings.theme_mode {
            effects.push(Effect::Invoke(BridgeCall::StoreSetThemeMode {
                mode: self.draft.theme_mode,
            }));
        }
        effects.push(Effect::Invoke(BridgeCall::StoreSettingsSave {
            settings: self.draft.clone(),
        }));

        // optimistic: the backend emits no settings push event
        app.settings = self.draft.clone();
        effects
    }
}

impl Mode for SettingsMode {
    fn id(&self) -> ModeId {
        ModeId::Settings
    }

    fn name(&self, _app: &AppState) -> String {
        "Settings".to_string()
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        self.draft = app.settings.clone();
        self.selected = 0;
        vec![]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        route(self, TABLE, app, key)
    }

    fn overlay(&self, _app: &AppState) -> Option<OverlayView> {
        let options = vec![
            OverlayOption {
                label: format!("Theme mode: {}", self.draft.theme_mode.label()),
                hint: None,
                highlights: vec![],
            },
            OverlayOption {
                label: format!(
                    "Focus new notes: {}",
                    if self.draft.focus_new_notes { "on" } else { "off" }
                ),
                hint: None,
                highlights: vec![],
            },
        ];

        Some(OverlayView {
            title: "Settings".to_string(),
            input: None,
            options,
            selected: self.selected,
            status: Some("Ctrl+Enter saves".to_string()),
        })
    }
}
