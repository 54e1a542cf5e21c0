//! Filesystem locations for configuration and diagnostics.
//!
//! The frontend core persists nothing of its own except the config file it
//! reads and the trace file it writes; item data lives entirely in the
//! backend. Paths follow the platform conventions reported by `dirs`.

use std::path::PathBuf;

/// Directory for frontend-owned files (trace output).
///
/// `$XDG_DATA_HOME/clipstack` on Linux, the platform equivalent elsewhere.
/// Falls back to the current directory when the platform reports no data
/// dir (stripped-down containers).
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clipstack")
}

/// Location of the TOML config file.
///
/// `$XDG_CONFIG_HOME/clipstack/config.toml` on Linux, the platform
/// equivalent elsewhere.
#[must_use]
pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clipstack")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_end_in_crate_directory() {
        assert!(data_dir().ends_with("clipstack"));
        assert!(config_file().ends_with("clipstack/config.toml"));
    }
}
