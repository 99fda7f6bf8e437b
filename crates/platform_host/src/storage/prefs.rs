//! Lightweight preference storage contracts and adapters.
//!
//! Preference stores are synchronous: the browser `localStorage` boundary never yields, and the
//! window manager writes its layout inline after every mutation.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the write (for example a quota error).
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Deletes a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be modified.
    fn delete_pref(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map, so a test can keep a handle while the runtime owns another.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Creates a store pre-seeded with one raw JSON value.
    pub fn with_entry(key: impl Into<String>, raw_json: impl Into<String>) -> Self {
        let store = Self::default();
        store
            .inner
            .borrow_mut()
            .insert(key.into(), raw_json.into());
        store
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns how many keys are currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_pref(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct PrefThing {
        details_visible: bool,
    }

    #[test]
    fn memory_prefs_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        store_obj.save_pref("pref.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load_pref("pref.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete_pref("pref.key").expect("delete");
        assert_eq!(store_obj.load_pref("pref.key").expect("load"), None);
    }

    #[test]
    fn memory_prefs_store_clones_share_storage() {
        let store = MemoryPrefsStore::with_entry("layout", "{}");
        let handle = store.clone();

        store.save_pref("other", "1").expect("save");

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.raw("layout").as_deref(), Some("{}"));
    }

    #[test]
    fn typed_pref_helpers_round_trip() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        save_pref_with(
            store_obj,
            "terminal.view",
            &PrefThing {
                details_visible: true,
            },
        )
        .expect("save typed pref");

        let loaded: Option<PrefThing> =
            load_pref_with(store_obj, "terminal.view").expect("load typed pref");
        assert_eq!(
            loaded,
            Some(PrefThing {
                details_visible: true
            })
        );

        store_obj.delete_pref("terminal.view").expect("delete typed pref");
        assert!(store.is_empty());
    }

    #[test]
    fn typed_pref_load_reports_corrupt_json() {
        let store = MemoryPrefsStore::with_entry("terminal.view", "{not json");
        let loaded = load_pref_with::<_, PrefThing>(&store, "terminal.view");
        assert!(loaded.is_err());
    }
}
