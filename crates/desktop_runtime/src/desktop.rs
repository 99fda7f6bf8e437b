//! Framework-independent composition of the registry and the store: mount, paint order, chrome
//! callbacks, and content commands.

use std::rc::Rc;

use desktop_app_contract::{
    TerminalContext, WindowCommand, WindowHost, WindowId, WindowPosition, WindowRegistry,
    WindowRenderContext, WindowSize,
};

use crate::{
    model::{Bounds, SnapZone},
    store::WindowStore,
};

/// Window chrome interaction routed to the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromeEvent {
    Focus,
    Close,
    Minimize,
    Maximize,
    Move(WindowPosition),
    Resize(WindowSize),
    Snap(Option<SnapZone>),
}

/// Applies a chrome event for `window_id`.
pub fn apply_chrome_event(store: &mut WindowStore, window_id: &str, event: ChromeEvent) {
    match event {
        ChromeEvent::Focus => store.bring_to_front(window_id),
        ChromeEvent::Close => store.close_window(window_id),
        ChromeEvent::Minimize => store.toggle_minimize(window_id),
        ChromeEvent::Maximize => store.toggle_maximize(window_id),
        ChromeEvent::Move(position) => {
            store.update_window_position(window_id, position.x, position.y)
        }
        ChromeEvent::Resize(size) => store.update_window_size(window_id, size.width, size.height),
        ChromeEvent::Snap(zone) => store.snap_window(window_id, zone),
    }
}

/// Applies a command sent by window content.
pub fn route_window_command(store: &mut WindowStore, command: WindowCommand) {
    match command {
        WindowCommand::Open(id) => store.open_window(id.as_str()),
        WindowCommand::Close(id) => store.close_window(id.as_str()),
    }
}

/// Paint-ready view of one open window.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedWindow {
    pub id: WindowId,
    pub title: String,
    pub bounds: Bounds,
    pub z_index: u32,
    pub is_maximized: bool,
    pub focused: bool,
}

/// Registry plus the collaborators handed to every content render.
pub struct Desktop<V> {
    registry: Rc<WindowRegistry<V>>,
    terminal: Option<TerminalContext>,
}

impl<V> Clone for Desktop<V> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            terminal: self.terminal.clone(),
        }
    }
}

impl<V> Desktop<V> {
    pub fn new(registry: Rc<WindowRegistry<V>>) -> Self {
        Self {
            registry,
            terminal: None,
        }
    }

    /// Shares `terminal` with every window's render context.
    pub fn with_terminal(mut self, terminal: TerminalContext) -> Self {
        self.terminal = Some(terminal);
        self
    }

    pub fn registry(&self) -> &WindowRegistry<V> {
        &self.registry
    }

    /// Initializes the store for `viewport`.
    pub fn mount(
        &self,
        store: &mut WindowStore,
        titles: &dyn Fn(&str) -> String,
        viewport: WindowSize,
    ) {
        store.initialize_windows(&self.registry, titles, viewport);
        leptos::logging::log!(
            "desktop mounted {} windows ({} open) at {}x{}",
            store.get_all_windows().len(),
            store.get_open_windows().len(),
            viewport.width,
            viewport.height
        );
    }

    /// Open, non-minimized windows in paint order (lowest z first).
    pub fn rendered_windows(&self, store: &WindowStore) -> Vec<RenderedWindow> {
        let state = store.state();
        state
            .open_windows_by_z()
            .into_iter()
            .map(|window| RenderedWindow {
                id: window.id.clone(),
                title: window.title.clone(),
                bounds: window.bounds(),
                z_index: window.z_index,
                is_maximized: window.is_maximized,
                focused: state.is_focused(window),
            })
            .collect()
    }

    pub fn render_context(&self, window_id: WindowId, host: WindowHost) -> WindowRenderContext {
        WindowRenderContext {
            window_id,
            host,
            terminal: self.terminal.clone(),
        }
    }

    /// Renders the content of `window_id`, or `None` for unregistered ids.
    pub fn render(&self, window_id: &str, host: WindowHost) -> Option<V> {
        let definition = self.registry.get(window_id)?;
        Some(definition.render(&self.render_context(definition.id.clone(), host)))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use desktop_app_contract::{DefaultPlacement, WindowDefinition};
    use pretty_assertions::assert_eq;
    use system_shell_contract::{CommandOutput, ShellRequest, TerminalSession};

    use super::*;

    fn desktop() -> Desktop<String> {
        let registry = WindowRegistry::from_definitions([
            WindowDefinition::new(
                "works",
                "works",
                WindowSize::new(400.0, 300.0),
                DefaultPlacement::At(WindowPosition::new(100.0, 100.0)),
                |ctx: &WindowRenderContext| {
                    ctx.open_window("project1");
                    format!("works terminal={}", ctx.terminal.is_some())
                },
            )
            .open_on_mount(true),
            WindowDefinition::new(
                "project1",
                "project1",
                WindowSize::new(300.0, 200.0),
                DefaultPlacement::Cascade,
                |ctx: &WindowRenderContext| format!("project {}", ctx.window_id),
            ),
        ])
        .expect("registry");
        let executor = |req: &ShellRequest| CommandOutput::text(req.line.clone());
        Desktop::new(Rc::new(registry))
            .with_terminal(TerminalContext::new(TerminalSession::default(), Rc::new(executor)))
    }

    #[test]
    fn content_commands_reach_the_store() {
        let desktop = desktop();
        let mut store = WindowStore::new();
        desktop.mount(&mut store, &|key| key.to_string(), WindowSize::new(1200.0, 900.0));

        let sent = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sent);
        let host = WindowHost::new(Rc::new(move |cmd| sink.borrow_mut().push(cmd)));
        assert_eq!(
            desktop.render("works", host).as_deref(),
            Some("works terminal=true")
        );
        assert_eq!(desktop.render("missing", WindowHost::noop()), None);

        for command in sent.borrow_mut().drain(..) {
            route_window_command(&mut store, command);
        }
        let rendered = desktop.rendered_windows(&store);
        let ids: Vec<&str> = rendered.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["works", "project1"]);
        assert!(rendered[1].focused);
        assert!(!rendered[0].focused);
    }

    #[test]
    fn chrome_events_map_to_store_operations() {
        let desktop = desktop();
        let mut store = WindowStore::new();
        desktop.mount(&mut store, &|key| key.to_string(), WindowSize::new(1200.0, 900.0));

        apply_chrome_event(&mut store, "works", ChromeEvent::Move(WindowPosition::new(5.0, 6.0)));
        apply_chrome_event(&mut store, "works", ChromeEvent::Resize(WindowSize::new(500.0, 400.0)));
        let works = store.get_window("works").expect("works");
        assert_eq!(works.bounds(), Bounds::new(WindowPosition::new(5.0, 6.0), WindowSize::new(500.0, 400.0)));

        apply_chrome_event(&mut store, "works", ChromeEvent::Minimize);
        assert!(desktop.rendered_windows(&store).is_empty());
        apply_chrome_event(&mut store, "works", ChromeEvent::Minimize);
        apply_chrome_event(&mut store, "works", ChromeEvent::Snap(Some(SnapZone::Top)));
        assert!(desktop.rendered_windows(&store)[0].is_maximized);
        apply_chrome_event(&mut store, "works", ChromeEvent::Close);
        assert!(desktop.rendered_windows(&store).is_empty());
    }
}
