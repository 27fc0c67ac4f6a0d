//! Key/value persistence behind the continuity stores.
//!
//! DESIGN
//! ======
//! Store logic in this module tree never touches `web-sys` directly; it goes
//! through [`StorageBackend`] so the same code runs against the browser's
//! `localStorage` in production and an in-memory map in tests. Storage being
//! unavailable (private mode, disabled storage, SSR) degrades silently to
//! "nothing persisted" — the join flow keeps working, it just loses
//! duplicate-prevention and recovery.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Minimal surface over a persistent string store.
pub trait StorageBackend {
    /// Raw string stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`. Failures are silent.
    fn write(&self, key: &str, value: &str);
    /// Remove `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// `localStorage`-backed store.
///
/// Every operation silently no-ops (reads as empty) when the browser denies
/// storage access or the code is running server-side.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
            storage.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            else {
                return;
            };
            let _ = storage.set_item(key, value);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            else {
                return;
            };
            let _ = storage.remove_item(key);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory backend for tests and any headless context.
///
/// Clones share the underlying map, which is how tests simulate a reload:
/// drop the store, build a fresh one over a clone of the same backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    cells: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Number of keys currently stored.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.cells.borrow().len()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.cells.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.cells
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.cells.borrow_mut().remove(key);
    }
}

/// Load and decode a JSON value stored under `key`.
///
/// Malformed stored values read as absent rather than failing.
pub fn load_json<T: DeserializeOwned>(storage: &impl StorageBackend, key: &str) -> Option<T> {
    let raw = storage.read(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            leptos::logging::warn!("discarding malformed record at {key}: {e}");
            None
        }
    }
}

/// Encode and store a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &impl StorageBackend, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    storage.write(key, &raw);
}
