//! Platform utilities: filesystem locations.

pub mod paths;

pub use paths::{config_file, data_dir};
