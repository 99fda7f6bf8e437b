//! Pure window geometry: placement, grid snapping, viewport clamping, and snap zones.

use desktop_app_contract::{WindowPosition, WindowSize};

use crate::model::{Bounds, SnapZone};

/// Top-left corner of the first cascade-placed window.
pub const CASCADE_ORIGIN: WindowPosition = WindowPosition::new(100.0, 80.0);
/// Diagonal step between consecutive cascade-placed windows.
pub const DEFAULT_CASCADE_OFFSET: f64 = 30.0;
/// Default grid pitch for [`snap_to_grid`].
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
/// Default margin kept by [`constrain_to_viewport`].
pub const DEFAULT_VIEWPORT_PADDING: f64 = 20.0;
/// Default edge distance that arms a snap zone.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 30.0;

/// Centers `size` inside `viewport`, never placing the corner above or left of the origin.
pub fn center_position(size: WindowSize, viewport: WindowSize) -> WindowPosition {
    WindowPosition::new(
        ((viewport.width - size.width) / 2.0).max(0.0),
        ((viewport.height - size.height) / 2.0).max(0.0),
    )
}

/// Position of the `index`-th cascade-placed window.
pub fn cascade_position(index: u32, offset: f64) -> WindowPosition {
    let step = f64::from(index) * offset;
    WindowPosition::new(CASCADE_ORIGIN.x + step, CASCADE_ORIGIN.y + step)
}

/// Rounds each axis to the nearest multiple of `grid`. Halves round toward positive infinity.
pub fn snap_to_grid(position: WindowPosition, grid: f64) -> WindowPosition {
    if grid <= 0.0 {
        return position;
    }
    let round = |value: f64| (value / grid + 0.5).floor() * grid;
    WindowPosition::new(round(position.x), round(position.y))
}

/// Clamps each axis into `[min_padding, viewport - size - min_padding]`.
///
/// When the window does not fit, the upper bound falls below `min_padding` and the axis collapses
/// to `min_padding`.
pub fn constrain_to_viewport(
    position: WindowPosition,
    size: WindowSize,
    viewport: WindowSize,
    min_padding: f64,
) -> WindowPosition {
    let max_x = viewport.width - size.width - min_padding;
    let max_y = viewport.height - size.height - min_padding;
    WindowPosition::new(
        position.x.min(max_x).max(min_padding),
        position.y.min(max_y).max(min_padding),
    )
}

/// Axis-aligned overlap test. Rectangles that share an edge count as overlapping.
pub fn overlaps(
    pos_a: WindowPosition,
    size_a: WindowSize,
    pos_b: WindowPosition,
    size_b: WindowSize,
) -> bool {
    !(pos_a.x + size_a.width < pos_b.x
        || pos_b.x + size_b.width < pos_a.x
        || pos_a.y + size_a.height < pos_b.y
        || pos_b.y + size_b.height < pos_a.y)
}

pub fn maximized_size(viewport: WindowSize, padding: f64) -> WindowSize {
    WindowSize::new(
        viewport.width - padding * 2.0,
        viewport.height - padding * 2.0,
    )
}

pub fn maximized_position(padding: f64) -> WindowPosition {
    WindowPosition::new(padding, padding)
}

/// Classifies a cursor position against the viewport edges.
///
/// Corners require both axes within half the threshold and win over edges. Proximity to the
/// bottom edge alone does not arm a zone.
pub fn detect_snap_zone(x: f64, y: f64, viewport: WindowSize, threshold: f64) -> Option<SnapZone> {
    let WindowSize { width, height } = viewport;
    let corner = threshold / 2.0;

    let is_left = x <= threshold;
    let is_right = x >= width - threshold;
    let is_top = y <= threshold;
    let is_bottom = y >= height - threshold;

    let near_left = is_left && x <= corner;
    let near_right = is_right && x >= width - corner;
    let near_top = is_top && y <= corner;
    let near_bottom = is_bottom && y >= height - corner;

    if near_top && near_left {
        Some(SnapZone::TopLeft)
    } else if near_top && near_right {
        Some(SnapZone::TopRight)
    } else if near_bottom && near_left {
        Some(SnapZone::BottomLeft)
    } else if near_bottom && near_right {
        Some(SnapZone::BottomRight)
    } else if is_left {
        Some(SnapZone::Left)
    } else if is_right {
        Some(SnapZone::Right)
    } else if is_top {
        Some(SnapZone::Top)
    } else {
        None
    }
}

/// Rectangle a window occupies when snapped into `zone`.
pub fn snapped_bounds(zone: SnapZone, viewport: WindowSize, padding: f64) -> Bounds {
    let WindowSize { width, height } = viewport;
    let half_width = (width - padding * 3.0) / 2.0;
    let half_height = (height - padding * 3.0) / 2.0;
    let second_column = half_width + padding * 2.0;
    let second_row = half_height + padding * 2.0;
    let full_height = height - padding * 2.0;

    let (x, y, w, h) = match zone {
        SnapZone::Left => (padding, padding, half_width, full_height),
        SnapZone::Right => (second_column, padding, half_width, full_height),
        SnapZone::Top => (padding, padding, width - padding * 2.0, full_height),
        SnapZone::TopLeft => (padding, padding, half_width, half_height),
        SnapZone::TopRight => (second_column, padding, half_width, half_height),
        SnapZone::BottomLeft => (padding, second_row, half_width, half_height),
        SnapZone::BottomRight => (second_column, second_row, half_width, half_height),
    };
    Bounds::new(WindowPosition::new(x, y), WindowSize::new(w, h))
}
