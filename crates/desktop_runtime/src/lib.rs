//! Window-manager runtime for the desktop shell: state model, geometry, store, gesture
//! controllers, keyboard shortcuts, and the Leptos components that render them.

pub mod components;
pub mod config;
pub mod desktop;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod shortcuts;
pub mod store;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{WindowManagerConfig, LAYOUT_STORAGE_KEY};
pub use desktop::{apply_chrome_event, route_window_command, ChromeEvent, Desktop, RenderedWindow};
pub use interaction::{Gesture, GestureCommit, InteractionController};
pub use model::*;
pub use persistence::{
    decode_layout, load_layout, persist_layout, LayoutPersistence, PersistenceError, StoreObserver,
};
pub use reducer::{reduce_windows, ReducerError, RuntimeEffect, WindowAction, WindowSeed};
pub use shortcuts::{handle_shortcut, KeyChord, ShortcutBindings, ShortcutHandlers};
pub use store::WindowStore;
