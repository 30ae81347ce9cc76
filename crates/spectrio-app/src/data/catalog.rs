//! Station catalog backed by a JSON file
//!
//! The file holds an ordered array of stations; the order defines
//! next/previous switching in the session.

use std::path::Path;

use spectrio::catalog::{Station, StationCatalog};

use crate::config::files::STATIONS_FILE;
use crate::data::storage;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct JsonCatalog {
    stations: Vec<Station>,
}

impl JsonCatalog {
    /// Load the stations file from the config directory. A missing file
    /// yields an empty catalog.
    pub fn load_default() -> Result<Self> {
        let path = storage::data_path(STATIONS_FILE)?;
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let stations = storage::load_from(path)?.unwrap_or_default();
        Ok(Self { stations })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        storage::save_to(path, &self.stations)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl StationCatalog for JsonCatalog {
    fn list(&self) -> Vec<Station> {
        self.stations.clone()
    }

    fn find(&self, id: &str) -> Option<Station> {
        self.stations.iter().find(|s| s.id == id).cloned()
    }
}
