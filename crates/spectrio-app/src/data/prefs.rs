//! Persistent preference store backed by a JSON file
//!
//! A flat key/value map written back after every mutation. Keys the app does
//! not know about are preserved, so newer and older versions can share the
//! file. Write failures are logged; the in-memory value always wins for the
//! current run.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;
use spectrio::prefs::PrefStore;

use crate::config::files::PREFS_FILE;
use crate::data::storage;
use crate::error::Result;

pub struct JsonPrefStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl JsonPrefStore {
    /// Open the preference file in the config directory, creating the map
    /// lazily on first write. A missing or empty file starts empty.
    pub fn open_default() -> Result<Self> {
        let path = storage::data_path(PREFS_FILE)?;
        Self::open(path)
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values: BTreeMap<String, Value> = storage::load_from(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, Value>)) {
        if let Ok(mut values) = self.values.lock() {
            apply(&mut values);
            if let Err(e) = storage::save_to(&self.path, &*values) {
                eprintln!("Failed to save preferences: {e}");
            }
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok().and_then(|v| v.get(key).cloned())
    }
}

impl PrefStore for JsonPrefStore {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.get(key)
            .and_then(|v| v.as_f64())
            .map(|f| f as f32)
            .unwrap_or(default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    fn set_float(&self, key: &str, value: f32) {
        self.mutate(|values| {
            values.insert(key.to_string(), Value::from(f64::from(value)));
        });
    }

    fn set_string(&self, key: &str, value: &str) {
        self.mutate(|values| {
            values.insert(key.to_string(), Value::from(value));
        });
    }

    fn remove(&self, key: &str) {
        self.mutate(|values| {
            values.remove(key);
        });
    }

    fn clear(&self) {
        self.mutate(BTreeMap::clear);
    }
}
