//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`WindowStore`] signal, the active gesture controller, and the
//! host wiring (layout storage, viewport tracking, content commands). UI composition stays in
//! [`crate::components`].

use std::rc::Rc;

use desktop_app_contract::{TerminalContext, WindowHost, WindowRegistry, WindowSize};
use leptos::*;

use crate::{
    config::WindowManagerConfig,
    desktop::{route_window_command, Desktop},
    interaction::InteractionController,
    reducer::WindowAction,
    shortcuts::ShortcutBindings,
    store::WindowStore,
};

#[derive(Clone, Copy)]
/// Leptos context for reading window-manager state and dispatching [`WindowAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive window store.
    pub store: RwSignal<WindowStore>,
    /// Drag/resize controller of the window currently under a gesture.
    pub interaction: RwSignal<Option<InteractionController>>,
    /// Registry and shared collaborators used to render window content.
    pub desktop: StoredValue<Desktop<View>>,
    /// Command sink handed to window content.
    pub host: StoredValue<WindowHost>,
    /// Windows opened by the global keyboard shortcuts.
    pub bindings: StoredValue<ShortcutBindings>,
    /// Store dispatch callback.
    pub dispatch: Callback<WindowAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a store action through the runtime context callback.
    pub fn dispatch_action(&self, action: WindowAction) {
        self.dispatch.call(action);
    }

    /// Runs `f` against the store and notifies subscribers.
    pub fn update_store<T>(&self, f: impl FnOnce(&mut WindowStore) -> T) -> Option<T> {
        self.store.try_update(f)
    }

    /// Geometry settings the store was built with.
    pub fn config(&self) -> WindowManagerConfig {
        self.store.with_untracked(|store| store.config().clone())
    }
}

fn current_viewport() -> WindowSize {
    let (width, height) = platform_host_web::viewport_size();
    WindowSize::new(width, height)
}

fn install_viewport_tracking(store: RwSignal<WindowStore>) {
    let resize_listener = window_event_listener(ev::resize, move |_| {
        let viewport = current_viewport();
        store.update(|store| store.set_viewport_size(viewport));
    });
    on_cleanup(move || resize_listener.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and mounts the registry.
pub fn DesktopProvider(
    /// Every window the desktop can show.
    registry: Rc<WindowRegistry<View>>,
    /// Resolves a registry title key into display text.
    #[prop(into)]
    titles: Callback<String, String>,
    /// Terminal shared with window content.
    #[prop(optional)]
    terminal: Option<TerminalContext>,
    /// Geometry and storage overrides.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    /// Windows opened by keyboard shortcuts.
    #[prop(optional)]
    bindings: Option<ShortcutBindings>,
    children: Children,
) -> impl IntoView {
    let prefs = Rc::new(platform_host_web::prefs_store());
    let mut window_store = WindowStore::with_prefs(prefs, config.unwrap_or_default());
    let mut desktop = Desktop::new(registry);
    if let Some(terminal) = terminal {
        desktop = desktop.with_terminal(terminal);
    }
    desktop.mount(
        &mut window_store,
        &|key| titles.call(key.to_string()),
        current_viewport(),
    );

    let store = create_rw_signal(window_store);
    let interaction = create_rw_signal(None::<InteractionController>);
    let host = store_value(WindowHost::new(Rc::new(move |command| {
        store.update(|store| route_window_command(store, command));
    })));
    let dispatch = Callback::new(move |action: WindowAction| {
        store.update(|store| {
            store.dispatch(action);
        });
    });

    let runtime = DesktopRuntimeContext {
        store,
        interaction,
        desktop: store_value(desktop),
        host,
        bindings: store_value(bindings.unwrap_or_default()),
        dispatch,
    };
    provide_context(runtime);
    install_viewport_tracking(store);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
