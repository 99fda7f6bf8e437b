//! Global keyboard shortcuts for window management.
//!
//! | chord | effect |
//! |---|---|
//! | `Escape` | close the top window (also while typing) |
//! | `Mod+W` | close the top window |
//! | `Mod+M` | toggle minimize on the top window |
//! | `Mod+T` / `Mod+A` / `Mod+P` | open the bound terminal / about / profile window |
//! | `Mod+1`..`Mod+9` | focus the N-th open window, lowest z first |
//!
//! `Mod` is Ctrl or Meta.

use desktop_app_contract::WindowId;

use crate::store::WindowStore;

/// Window operations the shortcut dispatcher needs.
pub trait ShortcutHandlers {
    fn open_window(&mut self, id: &str);
    fn close_window(&mut self, id: &str);
    fn toggle_minimize(&mut self, id: &str);
    fn bring_to_front(&mut self, id: &str);
    /// Open, non-minimized windows as `(id, z_index)`.
    fn open_windows(&self) -> Vec<(WindowId, u32)>;
}

impl ShortcutHandlers for WindowStore {
    fn open_window(&mut self, id: &str) {
        WindowStore::open_window(self, id);
    }

    fn close_window(&mut self, id: &str) {
        WindowStore::close_window(self, id);
    }

    fn toggle_minimize(&mut self, id: &str) {
        WindowStore::toggle_minimize(self, id);
    }

    fn bring_to_front(&mut self, id: &str) {
        WindowStore::bring_to_front(self, id);
    }

    fn open_windows(&self) -> Vec<(WindowId, u32)> {
        self.get_open_windows()
            .into_iter()
            .map(|w| (w.id.clone(), w.z_index))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Key press as seen by the dispatcher.
pub struct KeyChord {
    /// `KeyboardEvent.key` value.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// Focus is inside an input, textarea, or contenteditable element.
    pub in_text_field: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets the Ctrl modifier.
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Sets the Meta (Cmd) modifier.
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_field(mut self, in_text_field: bool) -> Self {
        self.in_text_field = in_text_field;
        self
    }

    fn is_mod(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Windows opened by the `Mod+T`, `Mod+A`, and `Mod+P` chords.
pub struct ShortcutBindings {
    pub terminal: WindowId,
    pub about: WindowId,
    pub profile: WindowId,
}

impl Default for ShortcutBindings {
    fn default() -> Self {
        Self {
            terminal: WindowId::trusted("terminal"),
            about: WindowId::trusted("about"),
            profile: WindowId::trusted("profile"),
        }
    }
}

fn top_window(handlers: &dyn ShortcutHandlers) -> Option<WindowId> {
    handlers
        .open_windows()
        .into_iter()
        .max_by_key(|(_, z)| *z)
        .map(|(id, _)| id)
}

/// Applies `chord`. Returns `true` when the chord was consumed and the caller should prevent the
/// browser default.
pub fn handle_shortcut(
    handlers: &mut dyn ShortcutHandlers,
    chord: &KeyChord,
    bindings: &ShortcutBindings,
) -> bool {
    if chord.key == "Escape" {
        return match top_window(handlers) {
            Some(id) => {
                handlers.close_window(id.as_str());
                true
            }
            None => false,
        };
    }
    if chord.in_text_field || !chord.is_mod() {
        return false;
    }

    match chord.key.to_lowercase().as_str() {
        "w" => {
            if let Some(id) = top_window(handlers) {
                handlers.close_window(id.as_str());
            }
        }
        "m" => {
            if let Some(id) = top_window(handlers) {
                handlers.toggle_minimize(id.as_str());
            }
        }
        "t" => handlers.open_window(bindings.terminal.as_str()),
        "a" => handlers.open_window(bindings.about.as_str()),
        "p" => handlers.open_window(bindings.profile.as_str()),
        key => {
            let digit = key
                .chars()
                .next()
                .filter(|_| key.len() == 1)
                .and_then(|c| c.to_digit(10));
            let Some(digit @ 1..=9) = digit.map(|d| d as usize) else {
                return false;
            };
            let mut open = handlers.open_windows();
            open.sort_by_key(|(_, z)| *z);
            if let Some((id, _)) = open.get(digit - 1) {
                handlers.bring_to_front(id.as_str());
            }
        }
    }
    true
}
