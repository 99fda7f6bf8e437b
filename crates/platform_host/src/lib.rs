//! Typed host-domain contracts shared by the window-manager runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services the runtime consumes. It only
//! exposes the key/value preference capability the window layout is persisted through; concrete
//! browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::prefs::{load_pref_with, save_pref_with, MemoryPrefsStore, PrefsStore};
