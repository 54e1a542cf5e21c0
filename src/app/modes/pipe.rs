//! Pipe-to-shell mode.
//!
//! Types a command, pipes the selected capture's content through it via the
//! backend, and shows execution status as it streams in. One mode serves
//! plain items and stacks alike; the backend resolves what the source id's
//! content means.
//!
//! Executions are fire-and-forget and cannot be cancelled. Every run gets a
//! fresh, monotonically increasing execution id; status events carrying any
//! other id are dropped, so re-running while a previous command is still
//! going can never show stale output.

use crate::app::effects::Effect;
use crate::app::keys;
use crate::app::modes::{hints, route, HotKey, KeyHint, Mode, ModeId};
use crate::app::state::AppState;
use crate::bridge::{BridgeCall, PipeStatus};
use crate::domain::ItemId;
use crate::ui::viewmodel::OverlayView;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Default)]
pub struct PipeMode {
    source: Option<ItemId>,

    /// Command line being edited. Retained across activations so a re-open
    /// can re-run the last command.
    command: String,

    /// Id generator; the next execution uses `next_exec_id + 1`.
    next_exec_id: u64,

    /// Most recently issued execution; status for anything else is stale.
    issued: Option<u64>,

    /// Status of the current execution, merged as partial updates arrive.
    status: Option<PipeStatus>,
}

static TABLE: &[HotKey<PipeMode>] = &[
    HotKey {
        name: "Run",
        keys: "Enter",
        matches: Some(|key| keys::plain(key, KeyCode::Enter)),
        run: PipeMode::run_command,
    },
    HotKey {
        name: "Close",
        keys: "Esc",
        matches: Some(|key| keys::plain(key, KeyCode::Esc)),
        run: |_, _| vec![Effect::Leave],
    },
];

impl PipeMode {
    fn run_command(&mut self, _app: &mut AppState) -> Vec<Effect> {
        let Some(source_id) = self.source.clone() else {
            return vec![];
        };
        let command = self.command.trim().to_string();
        if command.is_empty() {
            return vec![];
        }

        self.next_exec_id += 1;
        let exec_id = self.next_exec_id;
        self.issued = Some(exec_id);
        self.status = None;

        tracing::debug!(exec_id, command = %command, "issuing pipe execution");
        vec![Effect::Invoke(BridgeCall::StorePipeToCommand {
            exec_id,
            source_id,
            command,
        })]
    }

    /// Applies a streamed status update; stale execution ids are dropped.
    ///
    /// Returns whether the displayed status changed.
    pub fn apply_status(&mut self, update: &PipeStatus) -> bool {
        if self.issued != Some(update.exec_id) {
            tracing::debug!(
                stale = update.exec_id,
                current = ?self.issued,
                "dropping stale pipe status"
            );
            return false;
        }

        let merged = self.status.get_or_insert_with(|| PipeStatus {
            exec_id: update.exec_id,
            ..PipeStatus::default()
        });
        if update.out.is_some() {
            merged.out.clone_from(&update.out);
        }
        if update.err.is_some() {
            merged.err.clone_from(&update.err);
        }
        if update.code.is_some() {
            merged.code = update.code;
        }
        true
    }

    /// Displayed status of the current execution, for the view model.
    #[must_use]
    pub fn status(&self) -> Option<&PipeStatus> {
        self.status.as_ref()
    }
}

impl Mode for PipeMode {
    fn id(&self) -> ModeId {
        ModeId::Pipe
    }

    fn name(&self, _app: &AppState) -> String {
        match self.status.as_ref().and_then(|status| status.code) {
            Some(code) => format!("Pipe to shell (exit {code})"),
            None => "Pipe to shell".to_string(),
        }
    }

    fn key_hints(&self, _app: &AppState) -> Vec<KeyHint> {
        hints(TABLE)
    }

    fn activate(&mut self, app: &AppState) -> Vec<Effect> {
        self.source = app.nav.selected_id().cloned();
        vec![]
    }

    fn handle_key(&mut self, app: &mut AppState, key: &KeyEvent) -> Option<Vec<Effect>> {
        if let Some(effects) = route(self, TABLE, app, key) {
            return Some(effects);
        }
        if keys::plain(key, KeyCode::Backspace) {
            self.command.pop();
            return Some(vec![]);
        }
        keys::printable(key).map(|c| {
            self.command.push(c);
            vec![]
        })
    }

    fn overlay(&self, app: &AppState) -> Option<OverlayView> {
        let status_line = match self.status.as_ref() {
            None if self.issued.is_some() => Some("...".to_string()),
            None => None,
            Some(status) => {
                let mut parts = Vec::new();
                if let Some(out) = status.out.as_deref() {
                    parts.push(out.to_string());
                }
                if let Some(err) = status.err.as_deref() {
                    parts.push(err.to_string());
                }
                if let Some(code) = status.code {
                    parts.push(format!("exit {code}"));
                }
                Some(parts.join("\n"))
            }
        };

        Some(OverlayView {
            title: self.name(app),
            input: Some(self.command.clone()),
            options: vec![],
            selected: 0,
            status: status_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use std::rc::Rc;

    fn app() -> AppState {
        AppState::new(Rc::new(NullBridge), 16)
    }

    fn status(exec_id: u64, out: &str, code: Option<i32>) -> PipeStatus {
        PipeStatus {
            exec_id,
            out: Some(out.to_string()),
            err: None,
            code,
        }
    }

    #[test]
    fn stale_execution_results_are_ignored() {
        let mut mode = PipeMode {
            source: Some(ItemId("a".into())),
            command: "wc -l".to_string(),
            ..PipeMode::default()
        };
        let mut app = app();

        // issue #1, then #2 before #1 finishes
        mode.run_command(&mut app);
        assert_eq!(mode.issued, Some(1));
        mode.run_command(&mut app);
        assert_eq!(mode.issued, Some(2));

        // #1's late result must not touch displayed status
        assert!(!mode.apply_status(&status(1, "stale", Some(0))));
        assert!(mode.status().is_none());

        // #2's result applies
        assert!(mode.apply_status(&status(2, "fresh", Some(0))));
        assert_eq!(mode.status().unwrap().out.as_deref(), Some("fresh"));
    }

    #[test]
    fn partial_updates_merge() {
        let mut mode = PipeMode {
            source: Some(ItemId("a".into())),
            command: "sort".to_string(),
            ..PipeMode::default()
        };
        let mut app = app();
        mode.run_command(&mut app);

        mode.apply_status(&status(1, "line", None));
        assert!(mode.status().unwrap().code.is_none());

        mode.apply_status(&PipeStatus {
            exec_id: 1,
            out: None,
            err: None,
            code: Some(3),
        });
        let merged = mode.status().unwrap();
        assert_eq!(merged.out.as_deref(), Some("line"));
        assert_eq!(merged.code, Some(3));
    }

    #[test]
    fn exit_code_shows_in_mode_name() {
        let mut mode = PipeMode {
            source: Some(ItemId("a".into())),
            command: "true".to_string(),
            ..PipeMode::default()
        };
        let mut app = app();
        assert_eq!(mode.name(&app), "Pipe to shell");

        mode.run_command(&mut app);
        mode.apply_status(&status(1, "", Some(0)));
        assert_eq!(mode.name(&app), "Pipe to shell (exit 0)");
    }

    #[test]
    fn empty_command_or_no_source_is_a_noop() {
        let mut app = app();

        let mut no_source = PipeMode {
            command: "cat".to_string(),
            ..PipeMode::default()
        };
        assert!(no_source.run_command(&mut app).is_empty());

        let mut no_command = PipeMode {
            source: Some(ItemId("a".into())),
            ..PipeMode::default()
        };
        assert!(no_command.run_command(&mut app).is_empty());
        assert_eq!(no_command.issued, None);
    }
}
