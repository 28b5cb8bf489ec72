//! Key-value persistence for client-side state.
//!
//! Session tokens and application preferences survive restarts through a
//! [`Storage`] implementation — the moral equivalent of browser local
//! storage: string keys, string values, synchronous, and infallible from
//! the caller's point of view. [`MemoryStorage`] is the in-process
//! implementation used by the mocks and in tests; an embedding can supply
//! a file- or keychain-backed one instead.

use std::collections::HashMap;
use std::sync::RwLock;

/// A synchronous string key-value store.
///
/// Implementations swallow their own failures: a `get` that cannot read
/// returns `None`, a `set`/`remove` that cannot write is a no-op. Callers
/// treat persisted state as a cache of convenience, never as the source
/// of truth, so a lossy store degrades to "the user logs in again".
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str);
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// An in-memory [`Storage`] backed by a `RwLock<HashMap>`.
///
/// # Example
///
/// ```rust
/// use adminkit::storage::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// storage.set("theme_mode", "dark");
/// assert_eq!(storage.get("theme_mode").as_deref(), Some("dark"));
///
/// storage.remove("theme_mode");
/// assert!(storage.get("theme_mode").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        // A poisoned lock reads as an empty store rather than panicking.
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}
