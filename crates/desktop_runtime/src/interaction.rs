//! Per-window drag and resize gesture state machines.
//!
//! Live geometry stays local to the controller while a gesture runs and is committed to the
//! [`WindowStore`] on pointer release. Pointer moves are expected from the whole viewport so a
//! gesture continues when the cursor leaves the window.

use desktop_app_contract::{WindowId, WindowPosition, WindowSize};

use crate::{
    config::WindowManagerConfig,
    geometry::{detect_snap_zone, snapped_bounds},
    model::{Bounds, PointerPosition, SnapZone, WindowRecord},
    store::WindowStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Active gesture for one window.
pub enum Gesture {
    #[default]
    Idle,
    /// Moving the window; `offset` is the cursor position relative to the window corner.
    Dragging { offset: PointerPosition },
    /// Resizing from the bottom-right handle; `last` is the previous pointer sample.
    Resizing { last: PointerPosition },
}

/// What a pointer release committed to the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommit {
    Moved(WindowPosition),
    Snapped(SnapZone),
    Resized(WindowSize),
}

#[derive(Debug, Clone, PartialEq)]
/// Drag/resize controller for one rendered window.
pub struct InteractionController {
    window_id: WindowId,
    config: WindowManagerConfig,
    gesture: Gesture,
    live_position: Option<WindowPosition>,
    live_size: Option<WindowSize>,
    snap_preview: Option<SnapZone>,
}

impl InteractionController {
    pub fn new(window_id: WindowId, config: WindowManagerConfig) -> Self {
        Self {
            window_id,
            config,
            gesture: Gesture::Idle,
            live_position: None,
            live_size: None,
            snap_preview: None,
        }
    }

    pub fn window_id(&self) -> &WindowId {
        &self.window_id
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    /// Zone the window would snap into if the drag ended now.
    pub fn snap_preview(&self) -> Option<SnapZone> {
        self.snap_preview
    }

    /// Rectangle for the snap preview overlay.
    pub fn snap_preview_bounds(&self, viewport: WindowSize) -> Option<Bounds> {
        self.snap_preview
            .map(|zone| snapped_bounds(zone, viewport, self.config.snap_padding))
    }

    /// Geometry to render: live gesture values over the committed record.
    pub fn bounds(&self, record: &WindowRecord) -> Bounds {
        Bounds::new(
            self.live_position.unwrap_or(record.position),
            self.live_size.unwrap_or(record.size),
        )
    }

    /// Starts a drag from the title bar. Returns `false` when a gesture is already running or the
    /// window is unknown.
    ///
    /// A maximized window is restored first and re-centered under the cursor so the pointer lands
    /// inside its title bar.
    pub fn begin_drag(&mut self, store: &mut WindowStore, pointer: PointerPosition) -> bool {
        if self.gesture != Gesture::Idle {
            return false;
        }
        let id = self.window_id.as_str();
        let Some(record) = store.get_window(id).cloned() else {
            return false;
        };
        if !store.is_focused(id) {
            store.bring_to_front(id);
        }

        if record.is_maximized {
            let width = record
                .previous_size
                .map(|size| size.width)
                .unwrap_or(record.size.width);
            let grab = self.config.restore_grab_offset;
            store.toggle_maximize(id);
            let restored_size = store.get_window(id).map_or(record.size, |w| w.size);
            self.live_position = Some(WindowPosition::new(pointer.x - width / 2.0, pointer.y - grab));
            self.live_size = Some(restored_size);
            self.gesture = Gesture::Dragging {
                offset: PointerPosition::new(width / 2.0, grab),
            };
        } else {
            self.live_position = Some(record.position);
            self.live_size = Some(record.size);
            self.gesture = Gesture::Dragging {
                offset: PointerPosition::new(
                    pointer.x - record.position.x,
                    pointer.y - record.position.y,
                ),
            };
        }
        self.snap_preview = None;
        true
    }

    /// Starts a resize from the corner handle. Ignored while maximized or while another gesture
    /// runs.
    pub fn begin_resize(&mut self, store: &mut WindowStore, pointer: PointerPosition) -> bool {
        if self.gesture != Gesture::Idle {
            return false;
        }
        let id = self.window_id.as_str();
        let Some(record) = store.get_window(id).cloned() else {
            return false;
        };
        if record.is_maximized {
            return false;
        }
        if !store.is_focused(id) {
            store.bring_to_front(id);
        }
        self.live_position = Some(record.position);
        self.live_size = Some(record.size);
        self.gesture = Gesture::Resizing { last: pointer };
        true
    }

    /// Feeds a pointer sample. Returns `true` when live geometry changed.
    pub fn pointer_move(&mut self, viewport: WindowSize, pointer: PointerPosition) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging { offset } => {
                let width = self.live_size.map_or(0.0, |size| size.width);
                let max_x = viewport.width - self.config.min_visible_width;
                let max_y = viewport.height - self.config.title_bar_height;
                let x = (pointer.x - offset.x)
                    .min(max_x)
                    .max(-width + self.config.min_visible_width);
                let y = (pointer.y - offset.y).min(max_y).max(0.0);
                self.live_position = Some(WindowPosition::new(x, y));
                self.snap_preview =
                    detect_snap_zone(pointer.x, pointer.y, viewport, self.config.snap_threshold);
                true
            }
            Gesture::Resizing { last } => {
                let current = self.live_size.unwrap_or_default();
                self.live_size = Some(WindowSize::new(
                    (current.width + pointer.x - last.x).max(self.config.min_window_width),
                    (current.height + pointer.y - last.y).max(self.config.min_window_height),
                ));
                self.gesture = Gesture::Resizing { last: pointer };
                true
            }
        }
    }

    /// Ends the running gesture and commits its result.
    pub fn pointer_up(&mut self, store: &mut WindowStore) -> Option<GestureCommit> {
        let gesture = std::mem::take(&mut self.gesture);
        let preview = self.snap_preview.take();
        let position = self.live_position.take();
        let size = self.live_size.take();
        let id = self.window_id.as_str();

        match gesture {
            Gesture::Idle => None,
            Gesture::Dragging { .. } => {
                if let Some(zone) = preview {
                    store.snap_window(id, Some(zone));
                    Some(GestureCommit::Snapped(zone))
                } else {
                    let position = position?;
                    store.update_window_position(id, position.x, position.y);
                    Some(GestureCommit::Moved(position))
                }
            }
            Gesture::Resizing { .. } => {
                let size = size?;
                store.update_window_size(id, size.width, size.height);
                Some(GestureCommit::Resized(size))
            }
        }
    }
}
