//! New-note mode: type a note, hand it to the backend.
//!
//! When opened while browsing inside a stack, the note is created in that
//! stack; at the root it lands in the top-level history.

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::bridge::BridgeCall;
use crate::domain::ItemId;
use crate::ui::viewmodel::OverlayView;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct NewNoteMode {
    buffer: String,
    /// Target stack, snapshotted from the navigation context at activation.
    stack: Option<ItemId>,
}

static TABLE: &[HotKey<NewNoteMode>] = &[
    HotKey {
        name: "Create",
        keys: "Ctrl+Enter",
        matches: Some(|key| keys::ctrl_code(key, KeyCode::Enter)),
        run: NewNoteMode::create,
    },
    HotKey {
        name: "Discard",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl NewNoteMode {
    fn create(&mut self, app: &mut AppState) -> Vec<Effect> {
        if self.buffer.trim().is_empty() {
            return vec![];
        }
        vec![
            Effect::Leave,
            Effect::Invoke(BridgeCall::StoreNewNote {
                content: self.buffer.clone(),
                stack_id: self.stack.clone(),
                should_focus: Some(app.settings.focus_new_notes),
            }),
        ]
    }
}

impl Mode for NewNoteMode {
    fn id(&self) -> ModeId {
        ModeId::NewNote
    }

    fn name(&self, _app: &AppState) -> String {
        "New note".to_string()
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        self.buffer.clear();
        self.stack = app.nav.parent_stack_id().cloned();
        vec![]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if let Some(effects) = route(self, TABLE, app, key) {
            return Some(effects);
        }
        if keys::plain(key, KeyCode::Backspace) {
            self.buffer.pop();
            return Some(vec![]);
        }
        if keys::plain(key, KeyCode::Enter) {
            self.buffer.push('\n');
            return Some(vec![]);
        }
        keys::printable(key).map(|c| {
            self.buffer.push(c);
            vec![]
        })
    }

    fn overlay(&self, app: &AppState) -> Option<OverlayView> {
        let status = self
            .stack
            .as_ref()
            .and_then(|id| app.arena.get(id))
            .map(|stack| format!("into {}", stack.terse));

        Some(OverlayView {
            title: "New note".to_string(),
            input: Some(self.buffer.clone()),
            options: vec![],
            selected: 0,
            status,
        })
    }
}
