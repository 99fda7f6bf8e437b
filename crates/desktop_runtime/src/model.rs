//! Window-manager state model: per-window records, global stacking counters, and the persisted
//! layout projection.

use std::collections::BTreeMap;

use desktop_app_contract::{WindowId, WindowPosition, WindowSize};
use serde::{Deserialize, Serialize};

/// Stacking value assigned to windows that start open without a persisted z-index.
pub const INITIAL_Z_INDEX: u32 = 1;

/// Stored z-index values at or above this are treated as corrupt and fall back to defaults.
pub const MAX_PERSISTED_Z_INDEX: u32 = u32::MAX / 2;

/// Runtime state for one registered window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u32,
    pub position: WindowPosition,
    pub size: WindowSize,
    /// Geometry saved before entering maximize or a top snap.
    pub previous_position: Option<WindowPosition>,
    /// Size saved before entering maximize or a top snap.
    pub previous_size: Option<WindowSize>,
}

impl WindowRecord {
    /// Returns `true` when the window is open and painted (not minimized).
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }

    /// Current geometry as a rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.size)
    }
}

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub position: WindowPosition,
    pub size: WindowSize,
}

impl Bounds {
    pub const fn new(position: WindowPosition, size: WindowSize) -> Self {
        Self { position, size }
    }
}

/// Screen region a dragged window can snap into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapZone {
    Left,
    Right,
    /// Full-viewport snap; behaves like maximize.
    Top,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Top-level presentation of the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Desktop,
    /// Flat list of every registered window's content without chrome.
    Simplified,
}

impl ViewMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Desktop => Self::Simplified,
            Self::Simplified => Self::Desktop,
        }
    }
}

/// Pointer client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Authoritative window-manager state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// One record per registry id, in registry order.
    pub windows: Vec<WindowRecord>,
    pub highest_z_index: u32,
    pub cascade_index: u32,
    pub viewport_size: WindowSize,
    pub view_mode: ViewMode,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            highest_z_index: INITIAL_Z_INDEX,
            cascade_index: 0,
            viewport_size: WindowSize::default(),
            view_mode: ViewMode::Desktop,
        }
    }
}

impl DesktopState {
    /// Returns the record for `id`.
    pub fn window(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id.as_str() == id)
    }

    /// Returns the mutable record for `id`.
    pub fn window_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id.as_str() == id)
    }

    /// Open, non-minimized windows in registry order.
    pub fn open_windows(&self) -> Vec<&WindowRecord> {
        self.windows.iter().filter(|w| w.is_visible()).collect()
    }

    /// Open, non-minimized windows in ascending z order.
    pub fn open_windows_by_z(&self) -> Vec<&WindowRecord> {
        let mut open = self.open_windows();
        open.sort_by_key(|w| w.z_index);
        open
    }

    /// Returns `true` when `record` holds the highest stacking value.
    pub fn is_focused(&self, record: &WindowRecord) -> bool {
        record.is_visible() && record.z_index == self.highest_z_index
    }

    /// Id of the focused window, if any open window holds the highest z-index.
    pub fn focused_window_id(&self) -> Option<&WindowId> {
        self.windows
            .iter()
            .find(|w| self.is_focused(w))
            .map(|w| &w.id)
    }

    /// Id of the top-most open window, whether or not it holds the global highest value.
    pub fn top_window_id(&self) -> Option<&WindowId> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
            .map(|w| &w.id)
    }

    /// Builds the persisted projection of the current windows.
    pub fn layout_snapshot(&self) -> PersistedLayout {
        PersistedLayout {
            windows: self
                .windows
                .iter()
                .map(|w| {
                    (
                        w.id.clone(),
                        PersistedWindow {
                            position: Some(w.position),
                            size: Some(w.size),
                            is_open: Some(w.is_open),
                            z_index: Some(w.z_index),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Stored layout: `{ "windows": { "<id>": { position, size, isOpen, zIndex } } }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedLayout {
    #[serde(default)]
    pub windows: BTreeMap<WindowId, PersistedWindow>,
}

impl PersistedLayout {
    pub fn get(&self, id: &str) -> Option<&PersistedWindow> {
        self.windows.get(&WindowId::trusted(id))
    }
}

/// Persisted fragment for one window. Each field falls back to defaults on its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WindowPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WindowSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
}
