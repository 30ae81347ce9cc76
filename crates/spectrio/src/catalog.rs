//! Station catalog abstraction
//!
//! The session resolves station ids against a catalog; where the entries
//! come from (bundled JSON, remote directory, user favorites) is the host's
//! concern.

use serde::{Deserialize, Serialize};

/// A playable radio station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub stream_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stream_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stream_url: stream_url.into(),
            artwork_url: None,
        }
    }

    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }
}

/// Ordered source of stations. The ordering defines next/previous switching.
pub trait StationCatalog: Send + Sync {
    fn list(&self) -> Vec<Station>;

    fn find(&self, id: &str) -> Option<Station> {
        self.list().into_iter().find(|s| s.id == id)
    }
}

/// In-memory catalog with a fixed station list
#[derive(Debug, Default)]
pub struct StaticCatalog {
    stations: Vec<Station>,
}

impl StaticCatalog {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }
}

impl StationCatalog for StaticCatalog {
    fn list(&self) -> Vec<Station> {
        self.stations.clone()
    }

    fn find(&self, id: &str) -> Option<Station> {
        self.stations.iter().find(|s| s.id == id).cloned()
    }
}
