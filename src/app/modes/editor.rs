//! Editor mode: modify a captured note in place.
//!
//! Activation snapshots the selected item and seeds the buffer from the
//! cached body, then asks the backend for the raw (unrendered) content. The
//! raw answer replaces the buffer only while it is still untouched; a user
//! already typing wins over a late fetch.

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::bridge::BridgeCall;
use crate::domain::{ContentHash, ItemId};
use crate::ui::viewmodel::OverlayView;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct EditorMode {
    source: Option<ItemId>,
    hash: Option<ContentHash>,
    buffer: String,
    /// Set once the user edits; blocks late raw-content overwrites.
    touched: bool,
    /// Raw content requested but not yet arrived.
    awaiting_raw: bool,
}

static TABLE: &[HotKey<EditorMode>] = &[
    HotKey {
        name: "Save",
        keys: "Ctrl+Enter",
        matches: Some(|key| keys::ctrl_code(key, KeyCode::Enter)),
        run: EditorMode::save,
    },
    HotKey {
        name: "Save as new",
        keys: "Ctrl+Shift+Enter",
        matches: Some(|key| {
            use crossterm::event::KeyModifiers;
            key.code == KeyCode::Enter
                && key.modifiers == (KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        }),
        run: EditorMode::save_as_new,
    },
    HotKey {
        name: "Discard",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl EditorMode {
    fn save(&mut self, _app: &mut AppState) -> Vec<Effect> {
        let Some(source_id) = self.source.clone() else {
            return vec![Effect::Leave];
        };
        vec![
            Effect::Leave,
            Effect::Invoke(BridgeCall::StoreEditNote {
                source_id,
                content: self.buffer.clone(),
            }),
        ]
    }

    fn save_as_new(&mut self, _app: &mut AppState) -> Vec<Effect> {
        vec![
            Effect::Leave,
            Effect::Invoke(BridgeCall::StoreCapture {
                content: self.buffer.clone(),
                source_id: self.source.clone(),
                stack_name: None,
            }),
        ]
    }

    /// Feeds a raw-content answer into the buffer while it is untouched.
    pub fn apply_raw_content(&mut self, hash: &ContentHash, body: &str) {
        if self.hash.as_ref() != Some(hash) {
            return;
        }
        self.awaiting_raw = false;
        if self.touched {
            tracing::debug!("raw content arrived after edits, keeping buffer");
            return;
        }
        self.buffer = body.to_string();
    }
}

impl Mode for EditorMode {
    fn id(&self) -> ModeId {
        ModeId::Editor
    }

    fn name(&self, _app: &AppState) -> String {
        "Edit".to_string()
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        let Some(item) = app.selected_item() else {
            self.source = None;
            self.hash = None;
            self.buffer.clear();
            self.touched = false;
            self.awaiting_raw = false;
            return vec![];
        };

        self.source = Some(item.id.clone());
        self.hash = Some(item.hash.clone());
        self.touched = false;
        self.buffer = app
            .cache
            .peek(&item.hash)
            .map_or_else(|| item.terse.clone(), ToString::to_string);

        self.awaiting_raw = true;
        vec![Effect::Invoke(BridgeCall::StoreGetRawContent {
            hash: item.hash.clone(),
        })]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if let Some(effects) = route(self, TABLE, app, key) {
            return Some(effects);
        }
        if keys::plain(key, KeyCode::Backspace) {
            self.buffer.pop();
            self.touched = true;
            return Some(vec![]);
        }
        if keys::plain(key, KeyCode::Enter) {
            self.buffer.push('\n');
            self.touched = true;
            return Some(vec![]);
        }
        keys::printable(key).map(|c| {
            self.buffer.push(c);
            self.touched = true;
            vec![]
        })
    }

    fn overlay(&self, _app: &AppState) -> Option<OverlayView> {
        Some(OverlayView {
            title: "Edit".to_string(),
            input: Some(self.buffer.clone()),
            options: vec![],
            selected: 0,
            status: self
                .awaiting_raw
                .then(|| "fetching original...".to_string()),
        })
    }
}
