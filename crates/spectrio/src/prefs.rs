//! Key-value preference store abstraction
//!
//! Reads fall back to a caller-supplied default; writes are fire-and-forget.
//! Persistence (if any) is the implementation's concern.

use std::collections::HashMap;
use std::sync::Mutex;

pub trait PrefStore: Send + Sync {
    fn get_float(&self, key: &str, default: f32) -> f32;
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_float(&self, key: &str, value: f32);
    fn set_string(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}

#[derive(Debug, Clone, PartialEq)]
enum PrefValue {
    Float(f32),
    Text(String),
}

/// Non-persistent store, useful for tests and capture-less embeddings
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: Mutex<HashMap<String, PrefValue>>,
}

impl MemoryPrefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefStore {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.values.lock().ok().and_then(|v| v.get(key).cloned()) {
            Some(PrefValue::Float(f)) => f,
            _ => default,
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.values.lock().ok().and_then(|v| v.get(key).cloned()) {
            Some(PrefValue::Text(s)) => s,
            _ => default.to_string(),
        }
    }

    fn set_float(&self, key: &str, value: f32) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), PrefValue::Float(value));
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), PrefValue::Text(value.to_string()));
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut values) = self.values.lock() {
            values.clear();
        }
    }
}
