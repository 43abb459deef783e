//! Persistent state for the arithmetic drills.
//!
//! All state lives in a flat key-value store holding one JSON value per key,
//! the same layout the browser version kept in local storage. Reads never
//! fail: an absent or malformed value reads as the type's default. Writes are
//! fire-and-forget.

pub mod backend;
pub mod models;
pub mod repositories;

use serde::{Serialize, de::DeserializeOwned};

pub use backend::{FileStore, MemoryStore};

/// Fixed storage keys, compatible with the browser app.
pub mod keys {
    /// Practice history, newest first
    pub const HISTORY: &str = "mathPracticeHistory";
    /// Problems answered incorrectly
    pub const ERRORS: &str = "mathErrorProblems";
    /// Fresh batches graded today
    pub const DAILY_PRACTICE_COUNT: &str = "dailyPracticeCount";
    /// Calendar date the counter belongs to
    pub const LAST_PRACTICE_DATE: &str = "lastPracticeDate";
}

/// String key-value storage capability.
///
/// Implementations must not fail loudly: a backend that cannot persist a
/// write logs it and carries on.
pub trait KeyValueStore {
    /// Raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: String);

    /// Delete `key` if present.
    fn remove(&mut self, key: &str);
}

/// Load and decode the JSON value under `key`.
///
/// Returns `T::default()` when the key is absent or its value does not decode.
pub fn load<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored value");
            T::default()
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn save<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, raw),
        Err(e) => tracing::error!(key, error = %e, "failed to encode value for storage"),
    }
}
