//! Application layer: state, modes, actions, and event routing.
//!
//! This is the core of the crate, sitting between the host shim (which owns
//! the transport, the clipboard, and the window surface) and the
//! domain/cache/stack layers. It implements the event-driven, single-writer
//! architecture behind the interactive UI:
//!
//! ```text
//! Key / push event → Event → handle_event → state mutations → Effects → host
//!                       ↑                                        ↓
//!                       └──────────── bridge push events ────────┘
//! ```
//!
//! # Modules
//!
//! - [`state`]: the central [`AppState`] container
//! - [`handler`]: [`Event`] processing entry point
//! - [`dispatcher`]: mode registry and priority key routing
//! - [`modes`]: one implementation per interactive workflow
//! - [`actions`]: the contextual action registry
//! - [`effects`]: side-effect commands returned to the host
//! - [`keys`]: shared key-event predicates

pub mod actions;
pub mod dispatcher;
pub mod effects;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use dispatcher::Dispatcher;
pub use effects::{Effect, ModeIntent};
pub use handler::{handle_event, Event};
pub use modes::{KeyHint, Mode, ModeId};
pub use state::AppState;

use crate::bridge::Bridge;
use std::rc::Rc;

/// The root controller: owns all state and the mode registry.
///
/// There is exactly one `App` per UI surface, created by
/// [`initialize`](crate::initialize) and driven by
/// [`handle_event`](handler::handle_event).
pub struct App {
    pub state: AppState,
    pub dispatcher: Dispatcher,
}

impl App {
    /// Creates an app wired to a bridge with an empty item listing.
    #[must_use]
    pub fn new(bridge: Rc<dyn Bridge>, cache_capacity: usize) -> Self {
        Self {
            state: AppState::new(bridge, cache_capacity),
            dispatcher: Dispatcher::new(),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("active_mode", &self.dispatcher.active())
            .finish()
    }
}
