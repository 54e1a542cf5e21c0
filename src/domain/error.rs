//! Error types for the clipstack frontend core.
//!
//! This module defines the centralized error type [`ClipstackError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.

use thiserror::Error;

/// The main error type for clipstack operations.
///
/// This enum consolidates the error conditions that can occur in the frontend
/// core: malformed backend snapshots, configuration problems, and I/O failures
/// from the config/trace file paths. Backend invocation failures never surface
/// here; the bridge is fire-and-forget and failures come back (or don't) as
/// push events.
#[derive(Debug, Error)]
pub enum ClipstackError {
    /// A backend item snapshot violated a model invariant.
    ///
    /// Raised during ingest when a stack item has no children, a non-stack
    /// item carries children, or a stack (transitively) contains itself.
    /// The string names the offending item and the broken invariant.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Configuration is invalid or malformed.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed as TOML.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically
    /// converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A push-event payload could not be decoded.
    ///
    /// Occurs when the host delivers a payload on a known topic that does not
    /// deserialize into the expected shape. The event is dropped; the string
    /// carries the decode failure for logging.
    #[error("Push event decode error: {0}")]
    PushDecode(#[from] serde_json::Error),
}

/// A specialized `Result` type for clipstack operations.
///
/// This is a type alias for `std::result::Result<T, ClipstackError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, ClipstackError>;
