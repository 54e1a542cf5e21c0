//! Tracing and span export.
//!
//! The crate instruments its handler, routing, cache, and ingest paths with
//! `tracing` spans. This module turns those spans into an OTLP JSON trace
//! file with bounded rotation, for offline inspection; the frontend has no
//! network collector to ship to.

pub mod export;
pub mod init;
pub mod otlp;

pub use init::init_tracing;
