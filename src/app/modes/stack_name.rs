//! Stack-name mode: rename an existing stack or create a new one.
//!
//! One mode, two intents. The dispatcher sets the intent before activation;
//! the rename flavor snapshots the selected stack's current name as the
//! default input. Renaming goes through `store_edit_note`; the backend
//! stores a stack's name as its note body.

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::bridge::BridgeCall;
use crate::domain::ItemId;
use crate::ui::viewmodel::OverlayView;
use crossterm::event::{KeyCode, KeyEvent};

/// What the typed name will be used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameIntent {
    /// Rename the stack selected at activation.
    Rename,

    /// Create a fresh, empty stack.
    #[default]
    Create,
}

#[derive(Debug, Default)]
pub struct StackNameMode {
    intent: NameIntent,
    /// Stack being renamed; `None` for the create flavor.
    target: Option<ItemId>,
    input: String,
}

static TABLE: &[HotKey<StackNameMode>] = &[
    HotKey {
        name: "Save",
        keys: "Enter",
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: StackNameMode::save,
    },
    HotKey {
        name: "Cancel",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl StackNameMode {
    /// Sets the intent for the next activation. Called by the dispatcher
    /// before the activate hook runs.
    pub fn set_intent(&mut self, intent: NameIntent) {
        self.intent = intent;
    }

    fn save(&mut self, _app: &mut AppState) -> Vec<Effect> {
        let name = self.input.trim().to_string();
        if name.is_empty() {
            return vec![];
        }

        match (self.intent, self.target.clone()) {
            (NameIntent::Rename, Some(source_id)) => vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreEditNote {
                    source_id,
                    content: name,
                }),
            ],
            (NameIntent::Rename, None) => vec![Effect::Leave],
            (NameIntent::Create, _) => vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreNewStack { name }),
            ],
        }
    }
}

impl Mode for StackNameMode {
    fn id(&self) -> ModeId {
        ModeId::StackName
    }

    fn name(&self, _app: &AppState) -> String {
        match self.intent {
            NameIntent::Rename => "Rename stack".to_string(),
            NameIntent::Create => "New stack".to_string(),
        }
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        match self.intent {
            NameIntent::Rename => {
                let selected = app.selected_item().filter(|item| item.is_stack());
                self.target = selected.map(|stack| stack.id.clone());
                self.input = selected.map(|stack| stack.terse.clone()).unwrap_or_default();
            }
            NameIntent::Create => {
                self.target = None;
                self.input.clear();
            }
        }
        vec![]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if let Some(effects) = route(self, TABLE, app, key) {
            return Some(effects);
        }
        if keys::plain(key, KeyCode::Backspace) {
            self.input.pop();
            return Some(vec![]);
        }
        keys::printable(key).map(|c| {
            self.input.push(c);
            vec![]
        })
    }

    fn overlay(&self, app: &AppState) -> Option<OverlayView> {
        Some(OverlayView {
            title: self.name(app),
            input: Some(self.input.clone()),
            options: vec![],
            selected: 0,
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::RecordingBridge;
    use crate::domain::{ContentHash, ContentType, ItemSnapshot};
    use std::rc::Rc;

    fn app_with_stack() -> AppState {
        let mut app = AppState::new(Rc::new(RecordingBridge::default()), 16);
        let child = ItemSnapshot {
            id: ItemId("a".into()),
            touched: vec![],
            hash: ContentHash("sha256-a".into()),
            mime_type: "text/plain".into(),
            content_type: ContentType::Text,
            terse: "note a".into(),
            link: None,
            touched_at: 0,
            children: vec![],
        };
        let stack = ItemSnapshot {
            id: ItemId("s1".into()),
            touched: vec![],
            hash: ContentHash("sha256-s1".into()),
            mime_type: String::new(),
            content_type: ContentType::Stack,
            terse: "groceries".into(),
            link: None,
            touched_at: 0,
            children: vec![child],
        };
        app.apply_snapshot(&[stack]).unwrap();
        app
    }

    #[test]
    fn rename_seeds_current_name_and_edits_the_stack() {
        let mut app = app_with_stack();
        let mut mode = StackNameMode::default();
        mode.set_intent(NameIntent::Rename);
        mode.activate(&app);

        assert_eq!(mode.input, "groceries");

        mode.input.push_str(" 2");
        let effects = mode.save(&mut app);
        assert_eq!(
            effects,
            vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreEditNote {
                    source_id: ItemId("s1".into()),
                    content: "groceries 2".to_string(),
                })
            ]
        );
    }

    #[test]
    fn create_starts_blank_and_makes_a_new_stack() {
        let mut app = app_with_stack();
        let mut mode = StackNameMode::default();
        mode.set_intent(NameIntent::Create);
        mode.activate(&app);

        assert!(mode.input.is_empty());

        // empty name refuses to save
        assert!(mode.save(&mut app).is_empty());

        mode.input.push_str("errands");
        let effects = mode.save(&mut app);
        assert_eq!(
            effects,
            vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreNewStack {
                    name: "errands".to_string(),
                })
            ]
        );
    }
}
