//! Shared contract types between the desktop window manager runtime and the windows it hosts.
//!
//! The embedding application describes every window it can show as a [`WindowDefinition`]
//! (title key, default geometry, placement strategy, content renderer) and collects them in a
//! [`WindowRegistry`]. The runtime consumes the registry as data; content renderers are an opaque
//! capability generic over the view type `V`, so the contract does not bind to a UI framework.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use system_shell_contract::{CommandExecutor, TerminalSession};

/// Stable identifier for a registered window.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    /// Returns a window id when `raw` is a non-empty identifier made of ASCII letters, digits, `-`,
    /// or `_`, starting with a letter.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_window_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid window id `{raw}`; expected an identifier starting with a letter"
            ))
        }
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WindowId {
    fn from(raw: &str) -> Self {
        Self::trusted(raw)
    }
}

impl AsRef<str> for WindowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_valid_window_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    bytes[0].is_ascii_alphabetic()
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
}

/// Top-left corner of a window in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    /// Horizontal offset from the viewport's left edge.
    pub x: f64,
    /// Vertical offset from the viewport's top edge.
    pub y: f64,
}

impl WindowPosition {
    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in pixels, used for windows and the viewport alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl WindowSize {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where a window appears the first time it is initialized without persisted geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultPlacement {
    /// Centered in the viewport.
    Center,
    /// Fanned out diagonally from the previous cascade-placed window.
    Cascade,
    /// Explicit top-left corner.
    At(WindowPosition),
}

/// Window-management requests content can send back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowCommand {
    /// Open (or refocus) a window.
    Open(WindowId),
    /// Close a window.
    Close(WindowId),
}

/// Handle content uses to open or close windows.
#[derive(Clone)]
pub struct WindowHost {
    sender: Rc<dyn Fn(WindowCommand)>,
}

impl WindowHost {
    /// Creates a host from the runtime's command sink.
    pub fn new(sender: Rc<dyn Fn(WindowCommand)>) -> Self {
        Self { sender }
    }

    /// Creates a host that drops every command.
    pub fn noop() -> Self {
        Self::new(Rc::new(|_| {}))
    }

    /// Sends a raw command to the runtime.
    pub fn send(&self, command: WindowCommand) {
        (self.sender)(command);
    }

    /// Requests that `window_id` be opened and brought to front.
    pub fn open_window(&self, window_id: impl Into<WindowId>) {
        self.send(WindowCommand::Open(window_id.into()));
    }

    /// Requests that `window_id` be closed.
    pub fn close_window(&self, window_id: impl Into<WindowId>) {
        self.send(WindowCommand::Close(window_id.into()));
    }
}

impl fmt::Debug for WindowHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowHost").finish_non_exhaustive()
    }
}

/// Shared terminal session plus the interpreter that feeds it.
#[derive(Clone)]
pub struct TerminalContext {
    session: Rc<RefCell<TerminalSession>>,
    executor: Rc<dyn CommandExecutor>,
}

impl TerminalContext {
    /// Wraps a session and executor for sharing across window renders.
    pub fn new(session: TerminalSession, executor: Rc<dyn CommandExecutor>) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
            executor,
        }
    }

    /// Runs `line` through the executor, recording it in the shared session.
    pub fn execute(&self, line: &str) -> bool {
        self.session
            .borrow_mut()
            .execute(self.executor.as_ref(), line)
    }

    /// Replaces the pending command text.
    pub fn set_command(&self, command: impl Into<String>) {
        self.session.borrow_mut().set_command(command);
    }

    /// Reads the session state.
    pub fn with_session<T>(&self, f: impl FnOnce(&TerminalSession) -> T) -> T {
        f(&self.session.borrow())
    }
}

impl fmt::Debug for TerminalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalContext")
            .field("session", &self.session.borrow())
            .finish_non_exhaustive()
    }
}

/// Context handed to a window's content renderer.
#[derive(Debug, Clone)]
pub struct WindowRenderContext {
    /// Window being rendered.
    pub window_id: WindowId,
    /// Runtime handle for opening/closing windows.
    pub host: WindowHost,
    /// Shared terminal, when the embedding app provides one.
    pub terminal: Option<TerminalContext>,
}

impl WindowRenderContext {
    /// Requests that another window be opened.
    pub fn open_window(&self, window_id: impl Into<WindowId>) {
        self.host.open_window(window_id);
    }

    /// Requests that a window be closed.
    pub fn close_window(&self, window_id: impl Into<WindowId>) {
        self.host.close_window(window_id);
    }

    /// Requests that the window being rendered close itself.
    pub fn close_self(&self) {
        self.host.close_window(self.window_id.clone());
    }
}

/// Content renderer capability for one registered window.
pub trait WindowContent<V> {
    /// Produces the window body for `context`.
    fn render(&self, context: &WindowRenderContext) -> V;
}

impl<V, F> WindowContent<V> for F
where
    F: Fn(&WindowRenderContext) -> V,
{
    fn render(&self, context: &WindowRenderContext) -> V {
        self(context)
    }
}

/// Registration data for one window.
pub struct WindowDefinition<V> {
    /// Stable window id.
    pub id: WindowId,
    /// Key handed to the title resolver at initialization.
    pub title_key: String,
    /// Size used when nothing is persisted.
    pub default_size: WindowSize,
    /// Placement used when nothing is persisted.
    pub default_placement: DefaultPlacement,
    /// Whether the window starts open on a fresh session.
    pub open_on_mount: bool,
    content: Rc<dyn WindowContent<V>>,
}

impl<V> WindowDefinition<V> {
    /// Creates a definition that starts closed.
    pub fn new(
        id: impl Into<WindowId>,
        title_key: impl Into<String>,
        default_size: WindowSize,
        default_placement: DefaultPlacement,
        content: impl WindowContent<V> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title_key: title_key.into(),
            default_size,
            default_placement,
            open_on_mount: false,
            content: Rc::new(content),
        }
    }

    /// Sets whether the window starts open on a fresh session.
    pub fn open_on_mount(mut self, open: bool) -> Self {
        self.open_on_mount = open;
        self
    }

    /// Renders the window body.
    pub fn render(&self, context: &WindowRenderContext) -> V {
        self.content.render(context)
    }
}

impl<V> Clone for WindowDefinition<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title_key: self.title_key.clone(),
            default_size: self.default_size,
            default_placement: self.default_placement,
            open_on_mount: self.open_on_mount,
            content: Rc::clone(&self.content),
        }
    }
}

impl<V> fmt::Debug for WindowDefinition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowDefinition")
            .field("id", &self.id)
            .field("title_key", &self.title_key)
            .field("default_size", &self.default_size)
            .field("default_placement", &self.default_placement)
            .field("open_on_mount", &self.open_on_mount)
            .finish_non_exhaustive()
    }
}

/// Ordered set of window definitions, unique by id.
#[derive(Debug, Clone)]
pub struct WindowRegistry<V> {
    definitions: Vec<WindowDefinition<V>>,
}

impl<V> Default for WindowRegistry<V> {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }
}

impl<V> WindowRegistry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from definitions in order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first duplicated id.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = WindowDefinition<V>>,
    ) -> Result<Self, String> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Appends a definition.
    ///
    /// # Errors
    ///
    /// Returns an error when a definition with the same id is already registered.
    pub fn register(&mut self, definition: WindowDefinition<V>) -> Result<(), String> {
        if self.get(definition.id.as_str()).is_some() {
            return Err(format!("window `{}` is already registered", definition.id));
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Returns the definition for `id`.
    pub fn get(&self, id: &str) -> Option<&WindowDefinition<V>> {
        self.definitions.iter().find(|d| d.id.as_str() == id)
    }

    /// Iterates definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowDefinition<V>> {
        self.definitions.iter()
    }

    /// Number of registered windows.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
