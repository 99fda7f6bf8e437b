//! Window actions, side-effect intents, and transition logic for the window manager.

use desktop_app_contract::{DefaultPlacement, WindowId, WindowPosition, WindowSize};
use thiserror::Error;

use crate::{
    config::WindowManagerConfig,
    geometry::{
        cascade_position, center_position, maximized_position, maximized_size, snapped_bounds,
    },
    model::{
        DesktopState, PersistedLayout, SnapZone, ViewMode, WindowRecord, INITIAL_Z_INDEX,
        MAX_PERSISTED_Z_INDEX,
    },
};

/// Registry entry resolved for initialization (title already looked up).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSeed {
    pub id: WindowId,
    pub title: String,
    pub default_size: WindowSize,
    pub default_placement: DefaultPlacement,
    pub open_on_mount: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_windows`] to mutate [`DesktopState`].
pub enum WindowAction {
    /// Build or refresh one record per seed, merging live and persisted geometry.
    InitializeWindows {
        /// Registry entries in registry order.
        seeds: Vec<WindowSeed>,
        /// Current viewport.
        viewport: WindowSize,
        /// Layout loaded from storage; consulted for ids without a live record.
        persisted: PersistedLayout,
    },
    SetViewportSize(WindowSize),
    SetViewMode(ViewMode),
    ToggleViewMode,
    OpenWindow(WindowId),
    CloseWindow(WindowId),
    BringToFront(WindowId),
    ToggleMinimize(WindowId),
    ToggleMaximize(WindowId),
    UpdateWindowPosition {
        window_id: WindowId,
        position: WindowPosition,
    },
    UpdateWindowSize {
        window_id: WindowId,
        size: WindowSize,
    },
    /// Snap into `zone`; `None` leaves the window untouched.
    SnapWindow {
        window_id: WindowId,
        zone: Option<SnapZone>,
    },
    /// Drop every record and reset the counters.
    ResetWindows,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_windows`] for store observers to execute.
pub enum RuntimeEffect {
    /// Persist the current layout projection.
    PersistLayout,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The target window id is not registered.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
}

/// Applies a [`WindowAction`] to the window-manager state and collects resulting side effects.
///
/// The state is left untouched when an error is returned.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references an unregistered window.
pub fn reduce_windows(
    state: &mut DesktopState,
    config: &WindowManagerConfig,
    action: WindowAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        WindowAction::InitializeWindows {
            seeds,
            viewport,
            persisted,
        } => {
            initialize_windows(state, config, seeds, viewport, &persisted);
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::SetViewportSize(size) => {
            state.viewport_size = size;
        }
        WindowAction::SetViewMode(mode) => {
            state.view_mode = mode;
        }
        WindowAction::ToggleViewMode => {
            state.view_mode = state.view_mode.toggled();
        }
        WindowAction::OpenWindow(window_id) => {
            let next_z = state.highest_z_index.saturating_add(1);
            let window = find_window_mut(state, &window_id)?;
            window.is_open = true;
            window.is_minimized = false;
            window.z_index = next_z;
            state.highest_z_index = next_z;
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::CloseWindow(window_id) => {
            let window = find_window_mut(state, &window_id)?;
            window.is_open = false;
            window.is_minimized = false;
            window.is_maximized = false;
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::BringToFront(window_id) => {
            let highest = state.highest_z_index;
            let window = find_window_mut(state, &window_id)?;
            if window.z_index != highest {
                window.z_index = highest.saturating_add(1);
                state.highest_z_index = window.z_index;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::ToggleMinimize(window_id) => {
            let window = find_window_mut(state, &window_id)?;
            window.is_minimized = !window.is_minimized;
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::ToggleMaximize(window_id) => {
            let viewport = state.viewport_size;
            let window = find_window_mut(state, &window_id)?;
            if window.is_maximized {
                window.is_maximized = false;
                window.position = window.previous_position.take().unwrap_or(window.position);
                window.size = window.previous_size.take().unwrap_or(window.size);
            } else {
                window.is_maximized = true;
                window.previous_position = Some(window.position);
                window.previous_size = Some(window.size);
                window.position = maximized_position(config.maximize_padding);
                window.size = maximized_size(viewport, config.maximize_padding);
            }
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::UpdateWindowPosition {
            window_id,
            position,
        } => {
            find_window_mut(state, &window_id)?.position = position;
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::UpdateWindowSize { window_id, size } => {
            find_window_mut(state, &window_id)?.size = size;
            effects.push(RuntimeEffect::PersistLayout);
        }
        WindowAction::SnapWindow { window_id, zone } => {
            let viewport = state.viewport_size;
            let window = find_window_mut(state, &window_id)?;
            if let Some(zone) = zone {
                snap_window(window, zone, viewport, config.snap_padding);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        WindowAction::ResetWindows => {
            state.windows.clear();
            state.highest_z_index = INITIAL_Z_INDEX;
            state.cascade_index = 0;
            effects.push(RuntimeEffect::PersistLayout);
        }
    }

    Ok(effects)
}

fn find_window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Result<&'a mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

fn initialize_windows(
    state: &mut DesktopState,
    config: &WindowManagerConfig,
    seeds: Vec<WindowSeed>,
    viewport: WindowSize,
    persisted: &PersistedLayout,
) {
    let mut live = std::mem::take(&mut state.windows);
    let mut windows = Vec::with_capacity(seeds.len());

    for seed in seeds {
        if let Some(index) = live.iter().position(|w| w.id == seed.id) {
            let mut record = live.swap_remove(index);
            record.title = seed.title;
            windows.push(record);
            continue;
        }

        let fragment = persisted.get(seed.id.as_str()).copied().unwrap_or_default();
        let size = fragment.size.unwrap_or(seed.default_size);
        let position = match fragment.position {
            Some(position) => position,
            None => match seed.default_placement {
                DefaultPlacement::Center => center_position(size, viewport),
                DefaultPlacement::Cascade => {
                    let position = cascade_position(state.cascade_index, config.cascade_offset);
                    state.cascade_index += 1;
                    position
                }
                DefaultPlacement::At(position) => position,
            },
        };
        let is_open = fragment.is_open.unwrap_or(seed.open_on_mount);
        let z_index = fragment
            .z_index
            .filter(|z| *z < MAX_PERSISTED_Z_INDEX)
            .unwrap_or(if is_open { INITIAL_Z_INDEX } else { 0 });

        windows.push(WindowRecord {
            id: seed.id,
            title: seed.title,
            is_open,
            is_minimized: false,
            is_maximized: false,
            z_index,
            position,
            size,
            previous_position: None,
            previous_size: None,
        });
    }

    let max_z = windows
        .iter()
        .map(|w| w.z_index)
        .max()
        .unwrap_or(0)
        .max(INITIAL_Z_INDEX);
    state.windows = windows;
    state.highest_z_index = state.highest_z_index.max(max_z.saturating_add(1));
    state.viewport_size = viewport;
}

fn snap_window(window: &mut WindowRecord, zone: SnapZone, viewport: WindowSize, padding: f64) {
    let bounds = snapped_bounds(zone, viewport, padding);
    let was_maximized = window.is_maximized;

    if zone == SnapZone::Top {
        if !was_maximized {
            window.previous_position = Some(window.position);
            window.previous_size = Some(window.size);
        }
        window.is_maximized = true;
    } else {
        if !was_maximized {
            window.previous_position = None;
            window.previous_size = None;
        }
        window.is_maximized = false;
    }
    window.position = bounds.position;
    window.size = bounds.size;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PersistedWindow;

    const VIEWPORT: WindowSize = WindowSize::new(1200.0, 900.0);

    fn seed(id: &str, placement: DefaultPlacement, open: bool) -> WindowSeed {
        WindowSeed {
            id: WindowId::trusted(id),
            title: format!("Title {id}"),
            default_size: WindowSize::new(400.0, 300.0),
            default_placement: placement,
            open_on_mount: open,
        }
    }

    fn initialized(seeds: Vec<WindowSeed>, persisted: PersistedLayout) -> DesktopState {
        let mut state = DesktopState::default();
        reduce_windows(
            &mut state,
            &WindowManagerConfig::default(),
            WindowAction::InitializeWindows {
                seeds,
                viewport: VIEWPORT,
                persisted,
            },
        )
        .expect("initialize");
        state
    }

    fn apply(state: &mut DesktopState, action: WindowAction) -> Vec<RuntimeEffect> {
        reduce_windows(state, &WindowManagerConfig::default(), action).expect("reduce")
    }

    fn id(raw: &str) -> WindowId {
        WindowId::trusted(raw)
    }

    #[test]
    fn cascade_index_advances_only_for_cascade_placed_windows() {
        let state = initialized(
            vec![
                seed("a", DefaultPlacement::Cascade, true),
                seed("b", DefaultPlacement::Center, false),
                seed("c", DefaultPlacement::Cascade, false),
                seed("d", DefaultPlacement::At(WindowPosition::new(5.0, 6.0)), false),
            ],
            PersistedLayout::default(),
        );

        assert_eq!(state.cascade_index, 2);
        assert_eq!(state.windows[0].position, WindowPosition::new(100.0, 80.0));
        assert_eq!(state.windows[1].position, WindowPosition::new(400.0, 300.0));
        assert_eq!(state.windows[2].position, WindowPosition::new(130.0, 110.0));
        assert_eq!(state.windows[3].position, WindowPosition::new(5.0, 6.0));
        assert_eq!(state.highest_z_index, 2);
    }

    #[test]
    fn persisted_fields_fall_back_individually() {
        let mut persisted = PersistedLayout::default();
        persisted.windows.insert(
            id("a"),
            PersistedWindow {
                position: Some(WindowPosition::new(7.0, 8.0)),
                z_index: Some(9),
                ..PersistedWindow::default()
            },
        );
        persisted.windows.insert(id("ghost"), PersistedWindow::default());

        let state = initialized(vec![seed("a", DefaultPlacement::Cascade, false)], persisted);
        let a = &state.windows[0];

        assert_eq!(a.position, WindowPosition::new(7.0, 8.0));
        assert_eq!(a.size, WindowSize::new(400.0, 300.0));
        assert!(!a.is_open);
        assert_eq!(a.z_index, 9);
        assert_eq!(state.cascade_index, 0);
        assert_eq!(state.highest_z_index, 10);
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn reinitialize_keeps_live_geometry_and_refreshes_titles() {
        let mut state = initialized(
            vec![seed("a", DefaultPlacement::Cascade, true)],
            PersistedLayout::default(),
        );
        apply(
            &mut state,
            WindowAction::UpdateWindowPosition {
                window_id: id("a"),
                position: WindowPosition::new(333.0, 44.0),
            },
        );
        apply(&mut state, WindowAction::ToggleMaximize(id("a")));

        let mut renamed = seed("a", DefaultPlacement::Center, false);
        renamed.title = "Renamed".to_string();
        apply(
            &mut state,
            WindowAction::InitializeWindows {
                seeds: vec![renamed],
                viewport: WindowSize::new(800.0, 600.0),
                persisted: PersistedLayout::default(),
            },
        );

        let a = &state.windows[0];
        assert_eq!(a.title, "Renamed");
        assert!(a.is_open);
        assert!(a.is_maximized);
        assert_eq!(a.previous_position, Some(WindowPosition::new(333.0, 44.0)));
        assert_eq!(state.viewport_size, WindowSize::new(800.0, 600.0));
        assert_eq!(state.highest_z_index, 2);
    }

    #[test]
    fn open_and_bring_to_front_bump_the_counter() {
        let mut state = initialized(
            vec![
                seed("a", DefaultPlacement::Cascade, true),
                seed("b", DefaultPlacement::Cascade, false),
            ],
            PersistedLayout::default(),
        );

        apply(&mut state, WindowAction::OpenWindow(id("b")));
        assert_eq!(state.window("b").expect("b").z_index, 3);
        assert_eq!(state.highest_z_index, 3);

        let effects = apply(&mut state, WindowAction::BringToFront(id("b")));
        assert!(effects.is_empty());
        assert_eq!(state.highest_z_index, 3);

        apply(&mut state, WindowAction::BringToFront(id("a")));
        assert_eq!(state.window("a").expect("a").z_index, 4);
        assert_eq!(state.focused_window_id(), Some(&id("a")));
    }

    #[test]
    fn close_clears_flags_but_keeps_geometry_and_z() {
        let mut state = initialized(
            vec![seed("a", DefaultPlacement::Cascade, true)],
            PersistedLayout::default(),
        );
        apply(&mut state, WindowAction::ToggleMinimize(id("a")));
        apply(&mut state, WindowAction::ToggleMaximize(id("a")));
        let before = state.window("a").expect("a").clone();

        apply(&mut state, WindowAction::CloseWindow(id("a")));

        let a = state.window("a").expect("a");
        assert!(!a.is_open && !a.is_minimized && !a.is_maximized);
        assert_eq!(a.position, before.position);
        assert_eq!(a.size, before.size);
        assert_eq!(a.z_index, before.z_index);
    }

    #[test]
    fn plain_snap_without_prior_maximize_leaves_no_restore_geometry() {
        let mut state = initialized(
            vec![seed("a", DefaultPlacement::Cascade, true)],
            PersistedLayout::default(),
        );
        apply(
            &mut state,
            WindowAction::SnapWindow {
                window_id: id("a"),
                zone: Some(SnapZone::Right),
            },
        );
        let a = state.window("a").expect("a");
        assert_eq!(a.position, WindowPosition::new(600.0, 0.0));
        assert_eq!(a.size, WindowSize::new(600.0, 900.0));
        assert_eq!(a.previous_position, None);
        assert!(!a.is_maximized);
    }

    #[test]
    fn top_snap_on_maximized_window_keeps_original_restore_geometry() {
        let mut state = initialized(
            vec![seed("a", DefaultPlacement::Cascade, true)],
            PersistedLayout::default(),
        );
        apply(&mut state, WindowAction::ToggleMaximize(id("a")));
        apply(
            &mut state,
            WindowAction::SnapWindow {
                window_id: id("a"),
                zone: Some(SnapZone::Top),
            },
        );

        let a = state.window("a").expect("a");
        assert!(a.is_maximized);
        assert_eq!(a.previous_position, Some(WindowPosition::new(100.0, 80.0)));
        assert_eq!(a.previous_size, Some(WindowSize::new(400.0, 300.0)));
    }

    #[test]
    fn snap_to_none_and_unknown_ids_change_nothing() {
        let mut state = initialized(
            vec![seed("a", DefaultPlacement::Cascade, true)],
            PersistedLayout::default(),
        );
        let before = state.clone();
        let config = WindowManagerConfig::default();

        let effects = reduce_windows(
            &mut state,
            &config,
            WindowAction::SnapWindow {
                window_id: id("a"),
                zone: None,
            },
        )
        .expect("snap none");
        assert!(effects.is_empty());

        for action in [
            WindowAction::OpenWindow(id("zzz")),
            WindowAction::CloseWindow(id("zzz")),
            WindowAction::BringToFront(id("zzz")),
            WindowAction::ToggleMaximize(id("zzz")),
            WindowAction::SnapWindow {
                window_id: id("zzz"),
                zone: Some(SnapZone::Left),
            },
        ] {
            assert_eq!(
                reduce_windows(&mut state, &config, action),
                Err(ReducerError::WindowNotFound(id("zzz")))
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn reset_clears_windows_and_counters_but_keeps_viewport_and_mode() {
        let mut state = initialized(
            vec![seed("a", DefaultPlacement::Cascade, true)],
            PersistedLayout::default(),
        );
        apply(&mut state, WindowAction::ToggleViewMode);
        apply(&mut state, WindowAction::ResetWindows);

        assert!(state.windows.is_empty());
        assert_eq!(state.highest_z_index, 1);
        assert_eq!(state.cascade_index, 0);
        assert_eq!(state.viewport_size, VIEWPORT);
        assert_eq!(state.view_mode, ViewMode::Simplified);
    }

    #[test]
    fn stacking_counter_saturates_instead_of_wrapping() {
        let mut state = initialized(
            vec![
                seed("a", DefaultPlacement::Cascade, true),
                seed("b", DefaultPlacement::Cascade, true),
            ],
            PersistedLayout::default(),
        );
        state.highest_z_index = u32::MAX;
        state.window_mut("a").expect("a").z_index = u32::MAX;

        apply(&mut state, WindowAction::BringToFront(id("b")));
        assert_eq!(state.window("b").expect("b").z_index, u32::MAX);
        assert_eq!(state.highest_z_index, u32::MAX);

        apply(&mut state, WindowAction::OpenWindow(id("a")));
        assert_eq!(state.highest_z_index, u32::MAX);
        assert!(state.is_focused(state.window("a").expect("a")));
    }
}
