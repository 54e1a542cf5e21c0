//! Contextual action registry.
//!
//! Actions are the declarative list of operations on the current selection:
//! copy, edit, open, delete, pipe, grouping, and the entry points into the
//! creation modes. Each action carries an applicability predicate over
//! current state and, when it is keyboard-reachable from the main browsing
//! context, a key-match predicate. The action palette lists whatever is
//! currently applicable; `attempt_action` is the third stage of key routing.
//!
//! Applicability predicates are pure functions of the current selection and
//! are re-evaluated on every call: selection changes between key events, so
//! nothing here is ever cached.
//!
//! Triggers only emit effects: bridge calls, clipboard writes, and mode
//! entries. The item model is refreshed by backend push events, never by an
//! action directly.

use crate::app::effects::{Effect, ModeIntent};
use crate::app::keys;
use crate::app::state::AppState;
use crate::bridge::BridgeCall;
use crate::cache::ContentStatus;
use crate::domain::ContentType;
use crossterm::event::{KeyCode, KeyEvent};

/// One registered action.
pub struct ActionDef {
    /// Display name; also the lookup key for [`attempt_action_by_name`].
    pub name: &'static str,

    /// Display key combo for palette rows and footers.
    pub keys: &'static str,

    /// Whether the action applies to the current state. `None` means always
    /// applicable.
    pub applicable: Option<fn(&AppState) -> bool>,

    /// Key-match predicate. `None` means the action is not keyboard-routable
    /// here (its combo is owned by a global shortcut, or it is click/palette
    /// only).
    pub matches: Option<fn(&KeyEvent) -> bool>,

    /// The trigger. Mutates no item state; may touch the content cache to
    /// resolve the body being copied.
    pub run: fn(&mut AppState) -> Vec<Effect>,
}

/// The global, ordered action list. First key match wins.
pub static ACTIONS: &[ActionDef] = &[
    ActionDef {
        name: "Copy",
        keys: "Enter",
        applicable: Some(has_selection),
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: copy_selected,
    },
    ActionDef {
        name: "Edit note",
        keys: "Ctrl+E",
        applicable: Some(selected_is_text),
        matches: Some(|key| keys::ctrl(key, 'e')),
        run: |_| vec![Effect::Enter(ModeIntent::Editor)],
    },
    ActionDef {
        name: "Open link",
        keys: "Ctrl+B",
        applicable: Some(selected_is_link),
        matches: Some(|key| keys::ctrl(key, 'b')),
        run: open_selected_link,
    },
    ActionDef {
        name: "Delete",
        keys: "Ctrl+Backspace",
        applicable: Some(has_selection),
        matches: Some(|key| keys::ctrl_code(key, KeyCode::Backspace)),
        run: delete_selected,
    },
    ActionDef {
        name: "Pipe to shell",
        keys: "Ctrl+R",
        applicable: Some(selected_is_pipeable),
        matches: Some(|key| keys::ctrl(key, 'r')),
        run: |_| vec![Effect::Enter(ModeIntent::Pipe)],
    },
    ActionDef {
        name: "Copy entire stack",
        keys: "Ctrl+Shift+C",
        applicable: Some(inside_stack),
        matches: Some(|key| keys::ctrl_shift(key, 'c')),
        run: copy_current_stack,
    },
    ActionDef {
        name: "Rename stack",
        keys: "Ctrl+T",
        applicable: Some(selected_is_stack),
        matches: Some(|key| keys::ctrl(key, 't')),
        run: |_| vec![Effect::Enter(ModeIntent::RenameStack)],
    },
    // the remaining entries are reachable through global shortcuts; they are
    // listed here for the palette and by-name invocation only
    ActionDef {
        name: "Add to stack",
        keys: "Ctrl+S",
        applicable: Some(selected_is_groupable),
        matches: None,
        run: |_| vec![Effect::Enter(ModeIntent::AddToStack)],
    },
    ActionDef {
        name: "New note",
        keys: "Ctrl+O",
        applicable: None,
        matches: None,
        run: |_| vec![Effect::Enter(ModeIntent::NewNote)],
    },
    ActionDef {
        name: "New stack",
        keys: "Ctrl+Shift+O",
        applicable: None,
        matches: None,
        run: |_| vec![Effect::Enter(ModeIntent::NewStack)],
    },
    ActionDef {
        name: "Settings",
        keys: "Ctrl+,",
        applicable: None,
        matches: None,
        run: |_| vec![Effect::Enter(ModeIntent::Settings)],
    },
];

/// Routes a key event through the registry.
///
/// Ordered scan: skip actions whose applicability predicate fails, fire the
/// first remaining action whose key predicate matches. Returns `None` when
/// nothing matched (the caller falls through to filter typing).
pub fn attempt_action(app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
    for action in ACTIONS {
        if let Some(applicable) = action.applicable {
            if !applicable(app) {
                continue;
            }
        }
        let Some(matches) = action.matches else {
            continue;
        };
        if matches(key) {
            tracing::debug!(action = action.name, "action matched key");
            return Some((action.run)(app));
        }
    }
    None
}

/// Invokes an action by display name, bypassing key matching.
///
/// Used for palette selection and UI-click invocation. Applicability is
/// still honored; a non-applicable or unknown name returns `None`.
pub fn attempt_action_by_name(app: &mut AppState, name: &str) -> Option<Vec<Effect>> {
    let action = ACTIONS.iter().find(|action| action.name == name)?;
    if let Some(applicable) = action.applicable {
        if !applicable(app) {
            tracing::debug!(action = name, "action not applicable");
            return None;
        }
    }
    tracing::debug!(action = name, "action invoked by name");
    Some((action.run)(app))
}

/// Actions applicable to the current state, in registry order.
///
/// The palette seeds its option list from this at activation.
pub fn applicable_actions(app: &AppState) -> Vec<&'static ActionDef> {
    ACTIONS
        .iter()
        .filter(|action| action.applicable.map_or(true, |pred| pred(app)))
        .collect()
}

fn has_selection(app: &AppState) -> bool {
    app.selected_item().is_some()
}

fn selected_is_text(app: &AppState) -> bool {
    app.selected_item()
        .is_some_and(|item| item.content_type == ContentType::Text)
}

fn selected_is_link(app: &AppState) -> bool {
    app.selected_item().is_some_and(|item| item.link.is_some())
}

fn selected_is_stack(app: &AppState) -> bool {
    app.selected_item().is_some_and(crate::domain::Item::is_stack)
}

fn selected_is_pipeable(app: &AppState) -> bool {
    app.selected_item().is_some_and(|item| {
        matches!(item.content_type, ContentType::Text | ContentType::Stack)
    })
}

fn selected_is_groupable(app: &AppState) -> bool {
    app.selected_item().is_some_and(|item| !item.is_stack())
}

fn inside_stack(app: &AppState) -> bool {
    app.nav.depth() > 1
}

/// Copy trigger: resolved body to the clipboard, then dismiss.
///
/// Stacks are copied by the backend (it owns multi-item clipboard writes).
/// An unresolved body starts/continues its fetch and copies nothing; the
/// user retries once the preview is loaded.
fn copy_selected(app: &mut AppState) -> Vec<Effect> {
    let Some(item) = app.selected_item() else {
        return vec![];
    };
    let hash = item.hash.clone();
    let is_stack = item.is_stack();

    if is_stack {
        return vec![
            Effect::Invoke(BridgeCall::StoreCopyEntireStackToClipboard { stack_hash: hash }),
            Effect::DismissSurface,
        ];
    }

    match app.request_content(&hash) {
        ContentStatus::Loaded => {
            let body = app.cache.body(&hash).unwrap_or_default().to_string();
            vec![Effect::CopyClipboard(body), Effect::DismissSurface]
        }
        ContentStatus::Loading | ContentStatus::Unavailable => {
            tracing::debug!(hash = %hash, "copy deferred, content not resolved");
            vec![]
        }
    }
}

fn open_selected_link(app: &mut AppState) -> Vec<Effect> {
    app.selected_item()
        .and_then(|item| item.link.as_ref())
        .map(|link| vec![Effect::OpenUrl(link.url.clone())])
        .unwrap_or_default()
}

fn delete_selected(app: &mut AppState) -> Vec<Effect> {
    let Some(item) = app.selected_item() else {
        return vec![];
    };
    let hash = item.hash.clone();
    let stack_hash = app.parent_stack().map(|stack| stack.hash.clone());
    vec![Effect::Invoke(BridgeCall::StoreDelete { hash, stack_hash })]
}

fn copy_current_stack(app: &mut AppState) -> Vec<Effect> {
    let Some(stack) = app.parent_stack() else {
        return vec![];
    };
    vec![
        Effect::Invoke(BridgeCall::StoreCopyEntireStackToClipboard {
            stack_hash: stack.hash.clone(),
        }),
        Effect::DismissSurface,
    ]
}
