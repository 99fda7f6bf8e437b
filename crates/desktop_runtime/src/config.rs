//! Window-manager tunables.

use serde::{Deserialize, Serialize};

use crate::geometry::{DEFAULT_CASCADE_OFFSET, DEFAULT_SNAP_THRESHOLD};

/// Storage key for the persisted window layout.
pub const LAYOUT_STORAGE_KEY: &str = "desktop.windows.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Geometry and persistence settings shared by the store and interaction controllers.
///
/// Every field has a default, so a partial JSON override only needs the values it changes.
pub struct WindowManagerConfig {
    /// Edge distance (px) that arms a snap zone while dragging.
    pub snap_threshold: f64,
    /// Gap kept around snapped windows.
    pub snap_padding: f64,
    /// Gap kept around maximized windows.
    pub maximize_padding: f64,
    /// Diagonal step between cascade-placed windows.
    pub cascade_offset: f64,
    /// Smallest width a resize gesture can produce.
    pub min_window_width: f64,
    /// Smallest height a resize gesture can produce.
    pub min_window_height: f64,
    /// Horizontal slice of a dragged window that must stay on screen.
    pub min_visible_width: f64,
    /// Title-bar height; a dragged window's top stays this far above the viewport bottom.
    pub title_bar_height: f64,
    /// Vertical grab offset used when a drag pulls a window out of maximize.
    pub restore_grab_offset: f64,
    pub layout_storage_key: String,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            snap_padding: 0.0,
            maximize_padding: 0.0,
            cascade_offset: DEFAULT_CASCADE_OFFSET,
            min_window_width: 150.0,
            min_window_height: 50.0,
            min_visible_width: 50.0,
            title_bar_height: 28.0,
            restore_grab_offset: 20.0,
            layout_storage_key: LAYOUT_STORAGE_KEY.to_string(),
        }
    }
}

impl WindowManagerConfig {
    /// Parses a JSON override document, falling back to defaults when it is malformed.
    pub fn from_json_str(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(err) => {
                leptos::logging::warn!("window manager config ignored: {err}");
                Self::default()
            }
        }
    }
}
