//! Event handling: the single entry point for everything that happens.
//!
//! Key input and backend push deliveries both become [`Event`] values and
//! flow through [`handle_event`], which mutates state through the dispatcher
//! and the cache and returns `(should_render, effects)` for the host. Events
//! are applied strictly in receipt order; the frontend never reorders based
//! on when an in-flight request happens to complete.

use crate::app::effects::Effect;
use crate::app::App;
use crate::bridge::events::{
    ContentPayload, TOPIC_CONTENT, TOPIC_CONTENT_ERROR, TOPIC_PIPE_TO_SHELL, TOPIC_RAW_CONTENT,
    TOPIC_RECENT_ITEMS,
};
use crate::bridge::PipeStatus;
use crate::domain::{ContentHash, ItemSnapshot, Result};
use crossterm::event::KeyEvent;

/// Everything the frontend reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key-down from the host surface.
    Key(KeyEvent),

    /// Wholesale item listing replacing the current arena
    /// (`recent-items` topic; also the answer to `init_window`).
    RecentItems(Vec<ItemSnapshot>),

    /// A resolved content body (`content` topic).
    ContentLoaded { hash: ContentHash, body: String },

    /// A failed content fetch (`content-error` topic).
    ContentFailed { hash: ContentHash },

    /// A raw content body for the editor (`raw-content` topic).
    RawContentLoaded { hash: ContentHash, body: String },

    /// Pipe execution status (`pipe-to-shell` topic).
    PipeStatus(PipeStatus),
}

impl Event {
    /// Decodes a push delivery into an event.
    ///
    /// Unknown topics yield `Ok(None)` and are ignored by the host.
    ///
    /// # Errors
    ///
    /// Returns a decode error when a known topic carries a malformed
    /// payload; the host logs and drops it.
    pub fn from_push(topic: &str, payload: &str) -> Result<Option<Self>> {
        match topic {
            TOPIC_RECENT_ITEMS => {
                let items: Vec<ItemSnapshot> = serde_json::from_str(payload)?;
                Ok(Some(Self::RecentItems(items)))
            }
            TOPIC_PIPE_TO_SHELL => {
                let status: PipeStatus = serde_json::from_str(payload)?;
                Ok(Some(Self::PipeStatus(status)))
            }
            TOPIC_CONTENT => {
                let content: ContentPayload = serde_json::from_str(payload)?;
                Ok(Some(Self::ContentLoaded {
                    hash: content.hash,
                    body: content.content.unwrap_or_default(),
                }))
            }
            TOPIC_CONTENT_ERROR => {
                let content: ContentPayload = serde_json::from_str(payload)?;
                Ok(Some(Self::ContentFailed { hash: content.hash }))
            }
            TOPIC_RAW_CONTENT => {
                let content: ContentPayload = serde_json::from_str(payload)?;
                Ok(Some(Self::RawContentLoaded {
                    hash: content.hash,
                    body: content.content.unwrap_or_default(),
                }))
            }
            other => {
                tracing::debug!(topic = other, "ignoring unknown push topic");
                Ok(None)
            }
        }
    }
}

/// Processes one event. Returns whether the UI should re-render and the host
/// effects to execute, in order.
///
/// # Errors
///
/// Only snapshot ingest can fail (invariant violation in backend data); the
/// previous state is kept and the host logs the error. No other event path
/// returns an error; stale or unexpected deliveries are dropped silently
/// per the degraded-mode policy.
pub fn handle_event(app: &mut App, event: &Event) -> Result<(bool, Vec<Effect>)> {
    let _span = tracing::debug_span!("handle_event", event = ?event_name(event)).entered();

    match event {
        Event::Key(key) => Ok(app.dispatcher.route_key(&mut app.state, key)),

        Event::RecentItems(items) => {
            let render = app.state.apply_snapshot(items)?;
            Ok((render, vec![]))
        }

        Event::ContentLoaded { hash, body } => {
            app.state.cache.resolve(hash.clone(), body.clone());
            Ok((true, vec![]))
        }

        Event::ContentFailed { hash } => {
            app.state.cache.fail(hash);
            Ok((true, vec![]))
        }

        Event::RawContentLoaded { hash, body } => {
            // raw bodies bypass the cache: the cache holds rendered content
            // under the same hash and the two may differ
            app.dispatcher.apply_raw_content(hash, body);
            Ok((true, vec![]))
        }

        Event::PipeStatus(status) => {
            let applied = app.dispatcher.apply_pipe_status(status);
            Ok((applied, vec![]))
        }
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Key(_) => "Key",
        Event::RecentItems(_) => "RecentItems",
        Event::ContentLoaded { .. } => "ContentLoaded",
        Event::ContentFailed { .. } => "ContentFailed",
        Event::RawContentLoaded { .. } => "RawContentLoaded",
        Event::PipeStatus(_) => "PipeStatus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::effects::Effect;
    use crate::bridge::testing::RecordingBridge;
    use crate::domain::{ContentType, ItemId};
    use crate::stack::TypeFilter;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::rc::Rc;

    fn snapshot_item(id: &str, content_type: ContentType) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: match content_type {
                ContentType::Text => "text/plain".to_string(),
                _ => String::new(),
            },
            content_type,
            terse: format!("item {id}"),
            link: None,
            touched_at: 0,
            children: vec![],
        }
    }

    fn app_with(bridge: Rc<RecordingBridge>, items: Vec<ItemSnapshot>) -> App {
        let mut app = App::new(bridge, 16);
        handle_event(&mut app, &Event::RecentItems(items)).unwrap();
        app
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> (bool, Vec<Effect>) {
        handle_event(app, &Event::Key(KeyEvent::new(code, modifiers))).unwrap()
    }

    #[test]
    fn links_filter_over_non_link_items_yields_sentinel() {
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = app_with(bridge, vec![snapshot_item("A", ContentType::Text)]);

        app.state.set_type_filter(TypeFilter::Links);

        assert!(app.state.nav.current().visible.is_empty());
        assert!(app.state.selected_item().is_none());
    }

    #[test]
    fn copy_hotkey_writes_resolved_content_then_dismisses() {
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = app_with(Rc::clone(&bridge), vec![snapshot_item("A", ContentType::Text)]);

        // first copy press: body unresolved, a fetch goes out, nothing copied
        let (_, effects) = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(effects.is_empty());
        assert_eq!(bridge.count_of("store_get_content"), 1);

        // backend answers
        handle_event(
            &mut app,
            &Event::ContentLoaded {
                hash: ContentHash("sha256-A".into()),
                body: "hello".to_string(),
            },
        )
        .unwrap();

        let (_, effects) = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            effects,
            vec![
                Effect::CopyClipboard("hello".to_string()),
                Effect::DismissSurface
            ]
        );
    }

    #[test]
    fn no_applicable_action_means_no_effects() {
        // empty listing: nothing is selected, so every selection-gated
        // action's predicate fails and the key falls through
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = app_with(bridge.clone(), vec![]);

        let (_, effects) = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(effects.is_empty());
        assert!(bridge.calls.borrow().is_empty());
    }

    #[test]
    fn snapshot_with_broken_invariant_keeps_old_state() {
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = app_with(bridge, vec![snapshot_item("A", ContentType::Text)]);

        let mut broken = snapshot_item("S", ContentType::Stack);
        broken.children = vec![];
        let result = handle_event(&mut app, &Event::RecentItems(vec![broken]));

        assert!(result.is_err());
        assert_eq!(app.state.arena.len(), 1);
        assert!(app.state.selected_item().is_some());
    }

    #[test]
    fn push_decoding_maps_topics() {
        let payload = r#"{"exec_id": 4, "out": "ok", "code": 0}"#;
        let event = Event::from_push(TOPIC_PIPE_TO_SHELL, payload).unwrap().unwrap();
        assert!(matches!(event, Event::PipeStatus(ref s) if s.exec_id == 4));

        assert!(Event::from_push("unrelated", "{}").unwrap().is_none());
        assert!(Event::from_push(TOPIC_RECENT_ITEMS, "not json").is_err());
    }

    #[test]
    fn identical_snapshot_skips_render() {
        let bridge = Rc::new(RecordingBridge::default());
        let items = vec![snapshot_item("A", ContentType::Text)];
        let mut app = app_with(bridge, items.clone());

        let (render, _) = handle_event(&mut app, &Event::RecentItems(items)).unwrap();
        assert!(!render);
    }
}
