//! Window layout persistence: tolerant decoding of the stored projection and the after-mutation
//! observer that writes it back.

use std::rc::Rc;

use desktop_app_contract::WindowId;
use platform_host::PrefsStore;
use serde_json::Value;
use thiserror::Error;

use crate::{
    model::{DesktopState, PersistedLayout, PersistedWindow},
    reducer::RuntimeEffect,
};

#[derive(Debug, Error)]
/// Failures while writing the layout projection.
pub enum PersistenceError {
    #[error("failed to encode window layout: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write window layout: {0}")]
    Storage(String),
}

/// Decodes a stored layout, skipping entries that do not parse.
///
/// A payload that is not a JSON object with a `windows` object decodes as an empty layout.
pub fn decode_layout(raw: &str) -> PersistedLayout {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            leptos::logging::warn!("stored window layout is not valid JSON: {err}");
            return PersistedLayout::default();
        }
    };
    let Some(entries) = value.get("windows").and_then(Value::as_object) else {
        leptos::logging::warn!("stored window layout has no `windows` object");
        return PersistedLayout::default();
    };

    let mut layout = PersistedLayout::default();
    for (id, entry) in entries {
        match serde_json::from_value::<PersistedWindow>(entry.clone()) {
            Ok(window) => {
                layout.windows.insert(WindowId::trusted(id.as_str()), window);
            }
            Err(err) => leptos::logging::warn!("skipping stored layout for `{id}`: {err}"),
        }
    }
    layout
}

/// Loads the stored layout under `key`; unavailable storage reads as an empty layout.
pub fn load_layout(prefs: &dyn PrefsStore, key: &str) -> PersistedLayout {
    match prefs.load_pref(key) {
        Ok(Some(raw)) => decode_layout(&raw),
        Ok(None) => PersistedLayout::default(),
        Err(err) => {
            leptos::logging::warn!("window layout load failed: {err}");
            PersistedLayout::default()
        }
    }
}

/// Writes the layout projection of `state` under `key`.
///
/// # Errors
///
/// Returns [`PersistenceError`] when encoding or the storage write fails.
pub fn persist_layout(
    prefs: &dyn PrefsStore,
    key: &str,
    state: &DesktopState,
) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(&state.layout_snapshot())?;
    prefs
        .save_pref(key, &raw)
        .map_err(PersistenceError::Storage)
}

/// Receives the effects of every applied store action.
pub trait StoreObserver {
    fn on_effects(&self, state: &DesktopState, effects: &[RuntimeEffect]);
}

/// Observer that writes the layout projection whenever a mutation asks for it.
#[derive(Clone)]
pub struct LayoutPersistence {
    prefs: Rc<dyn PrefsStore>,
    key: String,
}

impl LayoutPersistence {
    pub fn new(prefs: Rc<dyn PrefsStore>, key: impl Into<String>) -> Self {
        Self {
            prefs,
            key: key.into(),
        }
    }

    /// Reads the layout this observer writes.
    pub fn load(&self) -> PersistedLayout {
        load_layout(self.prefs.as_ref(), &self.key)
    }
}

impl StoreObserver for LayoutPersistence {
    fn on_effects(&self, state: &DesktopState, effects: &[RuntimeEffect]) {
        if !effects.contains(&RuntimeEffect::PersistLayout) {
            return;
        }
        if let Err(err) = persist_layout(self.prefs.as_ref(), &self.key, state) {
            leptos::logging::warn!("{err}");
        }
    }
}
