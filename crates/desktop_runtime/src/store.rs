//! Window store: the single owner of [`DesktopState`].
//!
//! Every mutation goes through [`WindowStore::dispatch`], which runs the reducer and forwards the
//! resulting effects to the registered observers (layout persistence in practice). Operations on
//! unknown window ids are silent no-ops.

use std::rc::Rc;

use desktop_app_contract::{WindowId, WindowPosition, WindowRegistry, WindowSize};
use platform_host::PrefsStore;

use crate::{
    config::WindowManagerConfig,
    model::{DesktopState, PersistedLayout, SnapZone, ViewMode, WindowRecord},
    persistence::{LayoutPersistence, StoreObserver},
    reducer::{reduce_windows, ReducerError, WindowAction, WindowSeed},
};

/// Explicitly constructed window-manager state container.
#[derive(Clone)]
pub struct WindowStore {
    state: DesktopState,
    config: WindowManagerConfig,
    persisted: PersistedLayout,
    observers: Vec<Rc<dyn StoreObserver>>,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStore {
    /// Creates an in-memory store with default settings.
    pub fn new() -> Self {
        Self::with_config(WindowManagerConfig::default())
    }

    /// Creates an in-memory store.
    pub fn with_config(config: WindowManagerConfig) -> Self {
        Self {
            state: DesktopState::default(),
            config,
            persisted: PersistedLayout::default(),
            observers: Vec::new(),
        }
    }

    /// Creates a store that loads its layout from `prefs` once and writes it back after every
    /// mutation.
    pub fn with_prefs(prefs: Rc<dyn PrefsStore>, config: WindowManagerConfig) -> Self {
        let persistence = LayoutPersistence::new(prefs, config.layout_storage_key.clone());
        let persisted = persistence.load();
        let mut store = Self::with_config(config);
        store.persisted = persisted;
        store.add_observer(Rc::new(persistence));
        store
    }

    /// Registers an observer notified after every applied action.
    pub fn add_observer(&mut self, observer: Rc<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    /// Applies `action`. Returns `false` when it targeted an unknown window and nothing changed.
    pub fn dispatch(&mut self, action: WindowAction) -> bool {
        match reduce_windows(&mut self.state, &self.config, action) {
            Ok(effects) => {
                if !effects.is_empty() {
                    for observer in &self.observers {
                        observer.on_effects(&self.state, &effects);
                    }
                }
                true
            }
            Err(ReducerError::WindowNotFound(_)) => false,
        }
    }

    /// Builds or refreshes one record per registry entry for `viewport`.
    ///
    /// Live records keep their geometry; ids without one take the stored layout, then registry
    /// defaults. Titles are resolved through `titles` on every call.
    pub fn initialize_windows<V>(
        &mut self,
        registry: &WindowRegistry<V>,
        titles: &dyn Fn(&str) -> String,
        viewport: WindowSize,
    ) {
        let seeds = registry
            .iter()
            .map(|definition| WindowSeed {
                id: definition.id.clone(),
                title: titles(&definition.title_key),
                default_size: definition.default_size,
                default_placement: definition.default_placement,
                open_on_mount: definition.open_on_mount,
            })
            .collect();
        self.dispatch(WindowAction::InitializeWindows {
            seeds,
            viewport,
            persisted: self.persisted.clone(),
        });
    }

    pub fn set_viewport_size(&mut self, size: WindowSize) {
        self.dispatch(WindowAction::SetViewportSize(size));
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.dispatch(WindowAction::SetViewMode(mode));
    }

    pub fn toggle_view_mode(&mut self) {
        self.dispatch(WindowAction::ToggleViewMode);
    }

    pub fn open_window(&mut self, id: &str) {
        self.dispatch(WindowAction::OpenWindow(WindowId::trusted(id)));
    }

    pub fn close_window(&mut self, id: &str) {
        self.dispatch(WindowAction::CloseWindow(WindowId::trusted(id)));
    }

    pub fn bring_to_front(&mut self, id: &str) {
        self.dispatch(WindowAction::BringToFront(WindowId::trusted(id)));
    }

    pub fn toggle_minimize(&mut self, id: &str) {
        self.dispatch(WindowAction::ToggleMinimize(WindowId::trusted(id)));
    }

    pub fn toggle_maximize(&mut self, id: &str) {
        self.dispatch(WindowAction::ToggleMaximize(WindowId::trusted(id)));
    }

    pub fn update_window_position(&mut self, id: &str, x: f64, y: f64) {
        self.dispatch(WindowAction::UpdateWindowPosition {
            window_id: WindowId::trusted(id),
            position: WindowPosition::new(x, y),
        });
    }

    pub fn update_window_size(&mut self, id: &str, width: f64, height: f64) {
        self.dispatch(WindowAction::UpdateWindowSize {
            window_id: WindowId::trusted(id),
            size: WindowSize::new(width, height),
        });
    }

    pub fn snap_window(&mut self, id: &str, zone: Option<SnapZone>) {
        self.dispatch(WindowAction::SnapWindow {
            window_id: WindowId::trusted(id),
            zone,
        });
    }

    /// Drops every record and resets the counters. The stored layout is no longer consulted by
    /// later initializations.
    pub fn reset_windows(&mut self) {
        self.persisted = PersistedLayout::default();
        self.dispatch(WindowAction::ResetWindows);
    }

    pub fn get_window(&self, id: &str) -> Option<&WindowRecord> {
        self.state.window(id)
    }

    /// All records in registry order.
    pub fn get_all_windows(&self) -> &[WindowRecord] {
        &self.state.windows
    }

    /// Open, non-minimized records in registry order.
    pub fn get_open_windows(&self) -> Vec<&WindowRecord> {
        self.state.open_windows()
    }

    pub fn highest_z_index(&self) -> u32 {
        self.state.highest_z_index
    }

    pub fn viewport_size(&self) -> WindowSize {
        self.state.viewport_size
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// Returns `true` when `id` is open and holds the highest z-index.
    pub fn is_focused(&self, id: &str) -> bool {
        self.get_window(id)
            .is_some_and(|window| self.state.is_focused(window))
    }
}

impl std::fmt::Debug for WindowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowStore")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use desktop_app_contract::{DefaultPlacement, WindowDefinition};
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::LAYOUT_STORAGE_KEY;

    fn registry() -> WindowRegistry<()> {
        WindowRegistry::from_definitions([
            WindowDefinition::new(
                "a",
                "windows.a",
                WindowSize::new(400.0, 300.0),
                DefaultPlacement::Cascade,
                |_: &desktop_app_contract::WindowRenderContext| (),
            )
            .open_on_mount(true),
            WindowDefinition::new(
                "b",
                "windows.b",
                WindowSize::new(800.0, 400.0),
                DefaultPlacement::Center,
                |_: &desktop_app_contract::WindowRenderContext| (),
            ),
        ])
        .expect("registry")
    }

    fn title(key: &str) -> String {
        key.trim_start_matches("windows.").to_uppercase()
    }

    #[derive(Default)]
    struct CountingObserver {
        calls: Cell<usize>,
    }

    impl StoreObserver for CountingObserver {
        fn on_effects(&self, _state: &DesktopState, _effects: &[crate::reducer::RuntimeEffect]) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn initialize_resolves_titles_through_resolver() {
        let mut store = WindowStore::new();
        store.initialize_windows(&registry(), &title, WindowSize::new(1200.0, 900.0));
        assert_eq!(store.get_window("a").expect("a").title, "A");
        assert_eq!(store.get_all_windows().len(), 2);
        assert!(store.is_focused("a"));
        assert!(!store.is_focused("b"));
    }

    #[test]
    fn unknown_ids_notify_nobody_and_write_nothing() {
        let prefs = MemoryPrefsStore::default();
        let mut store = WindowStore::with_prefs(Rc::new(prefs.clone()), Default::default());
        let counter = Rc::new(CountingObserver::default());
        store.add_observer(counter.clone());

        store.open_window("missing");
        store.toggle_maximize("missing");
        store.update_window_size("missing", 1.0, 1.0);

        assert_eq!(counter.calls.get(), 0);
        assert!(prefs.is_empty());
    }

    #[test]
    fn mutations_write_layout_and_reload_restores_it() {
        let prefs = MemoryPrefsStore::default();
        let viewport = WindowSize::new(1200.0, 900.0);
        let mut store = WindowStore::with_prefs(Rc::new(prefs.clone()), Default::default());
        store.initialize_windows(&registry(), &title, viewport);
        store.open_window("b");
        store.update_window_position("b", 42.0, 43.0);
        store.toggle_minimize("b");
        assert!(prefs.raw(LAYOUT_STORAGE_KEY).is_some());

        let mut reloaded = WindowStore::with_prefs(Rc::new(prefs), Default::default());
        reloaded.initialize_windows(&registry(), &title, viewport);
        let b = reloaded.get_window("b").expect("b");
        assert!(b.is_open);
        assert!(!b.is_minimized);
        assert_eq!(b.position, WindowPosition::new(42.0, 43.0));
        assert_eq!(b.z_index, 3);
        assert_eq!(reloaded.highest_z_index(), 4);
    }

    #[test]
    fn reset_forgets_stored_layout_for_later_initialization() {
        let prefs = MemoryPrefsStore::with_entry(
            LAYOUT_STORAGE_KEY,
            r#"{"windows":{"a":{"position":{"x":5,"y":5},"isOpen":false}}}"#,
        );
        let viewport = WindowSize::new(1200.0, 900.0);
        let mut store = WindowStore::with_prefs(Rc::new(prefs.clone()), Default::default());
        store.initialize_windows(&registry(), &title, viewport);
        assert!(!store.get_window("a").expect("a").is_open);

        store.reset_windows();
        assert!(store.get_all_windows().is_empty());
        assert_eq!(
            prefs.raw(LAYOUT_STORAGE_KEY).as_deref(),
            Some(r#"{"windows":{}}"#)
        );

        store.initialize_windows(&registry(), &title, viewport);
        let a = store.get_window("a").expect("a");
        assert!(a.is_open);
        assert_eq!(a.position, WindowPosition::new(100.0, 80.0));
    }

    #[test]
    fn view_mode_toggles_without_touching_windows() {
        let mut store = WindowStore::new();
        store.initialize_windows(&registry(), &title, WindowSize::new(1200.0, 900.0));
        let windows = store.get_all_windows().to_vec();

        store.toggle_view_mode();
        assert_eq!(store.view_mode(), ViewMode::Simplified);
        store.set_view_mode(ViewMode::Desktop);
        assert_eq!(store.view_mode(), ViewMode::Desktop);
        assert_eq!(store.get_all_windows(), windows.as_slice());
    }
}
