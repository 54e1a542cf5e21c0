//! clipstack: frontend core of a clipboard/snippet manager.
//!
//! This crate is the reactive state machine behind a clipboard manager UI:
//! it lists captured items, lets the user browse, filter, group into stacks,
//! preview, edit, pipe-to-shell, and copy them back out. Capture, persistent
//! storage, content-addressed storage, and shell execution live in an
//! external native backend reached through a fire-and-forget invocation
//! bridge and a push-event channel. Rendering belongs to the host surface;
//! this crate computes view models.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host shim (transport, clipboard, window surface)   │
//! └─────────────────────────────────────────────────────┘
//!          │ key events / push events        ▲ effects
//!          ▼                                 │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │
//! │  - Event handling          - Mode dispatcher        │
//! │  - Action registry         - Effects                │
//! └─────────────────────────────────────────────────────┘
//!     │                 │                  │
//! ┌──────────┐  ┌──────────────┐  ┌────────────────┐
//! │ Stack    │  │ Content      │  │ Bridge         │
//! │ nav      │  │ cache        │  │ (calls/events) │
//! │ (stack/) │  │ (cache/)     │  │ (bridge/)      │
//! └──────────┘  └──────────────┘  └────────────────┘
//!     │                 │                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): items, arena, errors             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: event handling, modes, actions, effects
//! - [`domain`]: item model, id-keyed arena, error types
//! - [`stack`]: navigation frames, selection, filters
//! - [`cache`]: memoizing content cache with fetch coalescing
//! - [`bridge`]: backend call/event contract
//! - [`ui`]: view model computation
//! - [`infrastructure`]: platform paths
//! - [`observability`]: tracing with file-based OTLP export
//!
//! # Example
//!
//! ```
//! use clipstack::bridge::NullBridge;
//! use clipstack::{handle_event, initialize, Config, Event};
//! use std::rc::Rc;
//!
//! let config = Config::default();
//! let mut app = initialize(&config, Rc::new(NullBridge));
//!
//! // the host feeds events in and executes the returned effects
//! let (render, effects) = handle_event(&mut app, &Event::RecentItems(vec![]))?;
//! assert!(effects.is_empty());
//! # let _ = render;
//! # Ok::<(), clipstack::ClipstackError>(())
//! ```

pub mod app;
pub mod bridge;
pub mod cache;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod stack;
pub mod ui;

pub use app::{handle_event, App, AppState, Dispatcher, Effect, Event, ModeId, ModeIntent};
pub use bridge::{Bridge, BridgeCall};
pub use domain::{ClipstackError, Item, ItemId, Result};

use crate::cache::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;

/// Frontend configuration, read from `config.toml` in the platform config
/// directory.
///
/// Everything user-visible (theme, focus behavior) is a backend setting
/// edited through the settings mode; this file only tunes the frontend
/// process itself.
///
/// ```toml
/// trace_level = "debug"
/// cache_capacity = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter level (`trace`, `debug`, `info`, `warn`, `error`).
    /// `None` means `info`.
    pub trace_level: Option<String>,

    /// Upper bound on resolved bodies held by the content cache.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_level: None,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults, since a fresh install has no config.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Loads from the default platform location
    /// (see [`infrastructure::paths::config_file`]).
    ///
    /// # Errors
    ///
    /// Same conditions as [`Config::load`].
    pub fn load_default() -> Result<Self> {
        Self::load(&infrastructure::paths::config_file())
    }
}

/// Creates the application and requests the initial item snapshot.
///
/// The returned [`App`] is ready for event processing; the backend answers
/// the `init_window` call on the `recent-items` topic, which the host feeds
/// back as [`Event::RecentItems`].
pub fn initialize(config: &Config, bridge: Rc<dyn Bridge>) -> App {
    tracing::debug!(cache_capacity = config.cache_capacity, "initializing clipstack");

    let app = App::new(bridge, config.cache_capacity);
    app.state.bridge().invoke(&BridgeCall::InitWindow);
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::RecordingBridge;
    use std::io::Write;

    #[test]
    fn config_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "trace_level = \"debug\"").unwrap();
        writeln!(file, "cache_capacity = 64").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.cache_capacity, 64);
    }

    #[test]
    fn config_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cache_capacity = \"many\"").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn initialize_requests_the_first_snapshot() {
        let bridge = Rc::new(RecordingBridge::default());
        let app = initialize(&Config::default(), Rc::clone(&bridge) as Rc<dyn Bridge>);

        assert_eq!(bridge.count_of("init_window"), 1);
        assert!(app.state.arena.is_empty());
        assert_eq!(app.dispatcher.active(), ModeId::Main);
    }
}
