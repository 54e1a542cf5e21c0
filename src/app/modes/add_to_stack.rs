//! Add-to-stack mode: group the selected capture into a stack.
//!
//! The picker lists the existing top-level stacks. Typing narrows it; when
//! the query matches nothing, Enter creates a stack with the typed name and
//! adds the capture to it in one backend call.

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::chooser::Chooser;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::bridge::BridgeCall;
use crate::domain::ItemId;
use crate::ui::viewmodel::{OverlayOption, OverlayView};
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct AddToStackMode {
    /// Capture being grouped; snapshotted at activation.
    source: Option<ItemId>,
    stacks: Chooser<ItemId>,
}

static TABLE: &[HotKey<AddToStackMode>] = &[
    HotKey {
        name: "Next",
        keys: "Down",
        matches: Some(|key| keys::plain(key, KeyCode::Down) || keys::ctrl(key, 'n')),
        run: |mode, _| {
            mode.stacks.move_selection(1);
            vec![]
        },
    },
    HotKey {
        name: "Previous",
        keys: "Up",
        matches: Some(|key| keys::plain(key, KeyCode::Up) || keys::ctrl(key, 'p')),
        run: |mode, _| {
            mode.stacks.move_selection(-1);
            vec![]
        },
    },
    HotKey {
        name: "Add",
        keys: "Enter",
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: AddToStackMode::add_selected,
    },
    HotKey {
        name: "Close",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl AddToStackMode {
    fn add_selected(&mut self, _app: &mut AppState) -> Vec<Effect> {
        let Some(source_id) = self.source.clone() else {
            return vec![Effect::Leave];
        };

        if let Some(stack_id) = self.stacks.selected_payload().cloned() {
            return vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreAddToStack { stack_id, source_id }),
            ];
        }

        // no stack matches the query: create one with the typed name
        let name = self.stacks.query().trim().to_string();
        if name.is_empty() {
            return vec![];
        }
        vec![
            Effect::Leave,
            Effect::Invoke(BridgeCall::StoreAddToNewStack { name, source_id }),
        ]
    }
}

impl Mode for AddToStackMode {
    fn id(&self) -> ModeId {
        ModeId::AddToStack
    }

    fn name(&self, _app: &AppState) -> String {
        "Add to stack".to_string()
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        self.source = app.nav.selected_id().cloned();
        let entries = app
            .arena
            .root_stacks()
            .into_iter()
            .map(|stack| (stack.terse.clone(), stack.id.clone()))
            .collect();
        self.stacks.seed(entries);
        vec![]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if let Some(effects) = route(self, TABLE, app, key) {
            return Some(effects);
        }
        if keys::plain(key, KeyCode::Backspace) {
            self.stacks.pop_char();
            return Some(vec![]);
        }
        keys::printable(key).map(|c| {
            self.stacks.push_char(c);
            vec![]
        })
    }

    fn overlay(&self, _app: &AppState) -> Option<OverlayView> {
        let options: Vec<OverlayOption> = self
            .stacks
            .visible_options()
            .into_iter()
            .map(|(label, _, highlights)| OverlayOption {
                label: label.to_string(),
                hint: None,
                highlights,
            })
            .collect();

        let status = if options.is_empty() && !self.stacks.query().is_empty() {
            Some(format!("Enter creates \"{}\"", self.stacks.query().trim()))
        } else {
            None
        };

        Some(OverlayView {
            title: "Add to stack".to_string(),
            input: Some(self.stacks.query().to_string()),
            options,
            selected: self.stacks.selected_index(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::RecordingBridge;
    use crate::domain::{ContentHash, ContentType, ItemSnapshot};
    use crossterm::event::KeyModifiers;
    use std::rc::Rc;

    fn note(id: &str) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: "text/plain".into(),
            content_type: ContentType::Text,
            terse: format!("note {id}"),
            link: None,
            touched_at: 0,
            children: vec![],
        }
    }

    fn app_with_items() -> AppState {
        let mut app = AppState::new(Rc::new(RecordingBridge::default()), 16);
        let stack = ItemSnapshot {
            id: ItemId("s1".into()),
            touched: vec![],
            hash: ContentHash("sha256-s1".into()),
            mime_type: String::new(),
            content_type: ContentType::Stack,
            terse: "work".into(),
            link: None,
            touched_at: 0,
            children: vec![note("a")],
        };
        app.apply_snapshot(&[note("loose"), stack]).unwrap();
        app
    }

    #[test]
    fn adds_selection_to_an_existing_stack() {
        let mut app = app_with_items();
        // cursor on the loose note
        assert_eq!(app.selected_item().unwrap().id, ItemId("loose".into()));

        let mut mode = AddToStackMode::default();
        mode.activate(&app);

        let effects = mode.add_selected(&mut app);
        assert_eq!(
            effects,
            vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreAddToStack {
                    stack_id: ItemId("s1".into()),
                    source_id: ItemId("loose".into()),
                })
            ]
        );
    }

    #[test]
    fn unmatched_query_creates_a_new_stack() {
        let mut app = app_with_items();
        let mut mode = AddToStackMode::default();
        mode.activate(&app);

        for c in "inbox".chars() {
            mode.handle_key(&mut app, &KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let effects = mode.add_selected(&mut app);
        assert_eq!(
            effects,
            vec![
                Effect::Leave,
                Effect::Invoke(BridgeCall::StoreAddToNewStack {
                    name: "inbox".to_string(),
                    source_id: ItemId("loose".into()),
                })
            ]
        );
    }
}
