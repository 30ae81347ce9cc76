//! Data persistence
//!
//! Station list and preference files, stored as JSON in the config directory.

pub mod catalog;
pub mod prefs;
pub mod storage;

pub use catalog::JsonCatalog;
pub use prefs::JsonPrefStore;
pub use storage::{config_dir, data_path, ensure_config_dir};
