//! Configuration constants for spectrio app services

/// Application metadata
pub mod app {
    /// Application name (used for the config directory, etc.)
    pub const NAME: &str = "spectrio";
}

/// Data file names inside the config directory
pub mod files {
    pub const STATIONS_FILE: &str = "stations.json";
    pub const PREFS_FILE: &str = "prefs.json";
}
