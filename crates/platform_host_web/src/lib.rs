//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring for the preference store the window layout is
//! persisted through, plus the viewport query the desktop shell boots from. Non-wasm builds
//! compile to inert fallbacks so native tests can link the runtime.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod viewport;

pub use storage::local_prefs::WebPrefsStore;
pub use viewport::{viewport_size, FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};

/// Returns the preference store adapter for the active build target.
pub fn prefs_store() -> WebPrefsStore {
    WebPrefsStore
}
