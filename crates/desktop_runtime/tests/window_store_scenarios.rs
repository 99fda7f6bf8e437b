use std::rc::Rc;

use desktop_app_contract::{
    DefaultPlacement, WindowDefinition, WindowPosition, WindowRegistry, WindowRenderContext,
    WindowSize,
};
use desktop_runtime::{SnapZone, WindowStore, LAYOUT_STORAGE_KEY};
use platform_host::MemoryPrefsStore;
use pretty_assertions::assert_eq;

const VIEWPORT: WindowSize = WindowSize::new(1200.0, 900.0);

fn registry() -> WindowRegistry<String> {
    WindowRegistry::from_definitions([
        WindowDefinition::new(
            "A",
            "windows.a",
            WindowSize::new(400.0, 300.0),
            DefaultPlacement::Cascade,
            |_: &WindowRenderContext| "a".to_string(),
        )
        .open_on_mount(true),
        WindowDefinition::new(
            "B",
            "windows.b",
            WindowSize::new(800.0, 400.0),
            DefaultPlacement::Center,
            |_: &WindowRenderContext| "b".to_string(),
        ),
    ])
    .expect("registry")
}

fn mounted() -> WindowStore {
    let mut store = WindowStore::new();
    store.initialize_windows(&registry(), &|key| key.to_string(), VIEWPORT);
    store
}

#[test]
fn two_window_session_end_to_end() {
    let mut store = mounted();

    let a = store.get_window("A").expect("A").clone();
    assert!(a.is_open);
    assert_eq!(a.position, WindowPosition::new(100.0, 80.0));
    assert_eq!(a.size, WindowSize::new(400.0, 300.0));
    assert_eq!(a.z_index, 1);

    let b = store.get_window("B").expect("B").clone();
    assert!(!b.is_open);
    assert_eq!(b.position, WindowPosition::new(200.0, 250.0));
    assert_eq!(b.size, WindowSize::new(800.0, 400.0));
    assert_eq!(b.z_index, 0);
    assert_eq!(store.highest_z_index(), 2);

    store.open_window("B");
    let b = store.get_window("B").expect("B");
    assert!(b.is_open);
    assert_eq!(b.z_index, 3);
    assert_eq!(store.highest_z_index(), 3);

    store.toggle_maximize("B");
    let b = store.get_window("B").expect("B");
    assert!(b.is_maximized);
    assert_eq!(b.position, WindowPosition::new(0.0, 0.0));
    assert_eq!(b.size, WindowSize::new(1200.0, 900.0));
    assert_eq!(b.previous_position, Some(WindowPosition::new(200.0, 250.0)));
    assert_eq!(b.previous_size, Some(WindowSize::new(800.0, 400.0)));
}

#[test]
fn z_order_is_monotonic_and_focus_is_idempotent() {
    let mut store = mounted();
    let mut last = store.highest_z_index();

    for id in ["B", "A", "A", "B", "B", "A"] {
        store.bring_to_front(id);
        store.open_window(id);
        let highest = store.highest_z_index();
        assert!(highest >= last);
        assert_eq!(store.get_window(id).expect("window").z_index, highest);
        last = highest;
    }

    store.bring_to_front("B");
    let after_first = store.highest_z_index();
    store.bring_to_front("B");
    assert_eq!(store.highest_z_index(), after_first);
}

#[test]
fn close_then_reopen_preserves_geometry() {
    let mut store = mounted();
    store.update_window_position("A", 321.0, 123.0);
    store.update_window_size("A", 640.0, 480.0);
    store.toggle_minimize("A");

    store.close_window("A");
    store.open_window("A");

    let a = store.get_window("A").expect("A");
    assert!(a.is_open && !a.is_minimized);
    assert_eq!(a.position, WindowPosition::new(321.0, 123.0));
    assert_eq!(a.size, WindowSize::new(640.0, 480.0));
}

#[test]
fn maximize_round_trip_restores_exact_geometry() {
    let mut store = mounted();
    store.update_window_position("A", -17.5, 33.25);
    store.update_window_size("A", 1999.0, 77.0);
    store.set_viewport_size(WindowSize::new(640.0, 360.0));

    store.toggle_maximize("A");
    assert_eq!(
        store.get_window("A").expect("A").size,
        WindowSize::new(640.0, 360.0)
    );
    store.toggle_maximize("A");

    let a = store.get_window("A").expect("A");
    assert!(!a.is_maximized);
    assert_eq!(a.position, WindowPosition::new(-17.5, 33.25));
    assert_eq!(a.size, WindowSize::new(1999.0, 77.0));
    assert_eq!(a.previous_position, None);
    assert_eq!(a.previous_size, None);
}

#[test]
fn top_snap_saves_geometry_and_maximize_toggle_restores_it() {
    let mut store = mounted();
    store.update_window_position("A", 321.0, 123.0);
    store.update_window_size("A", 640.0, 480.0);

    store.snap_window("A", Some(SnapZone::Top));
    let snapped = store.get_window("A").expect("A").clone();
    assert!(snapped.is_maximized);
    assert_eq!(snapped.position, WindowPosition::new(0.0, 0.0));
    assert_eq!(snapped.size, WindowSize::new(1200.0, 900.0));
    assert_eq!(snapped.previous_position, Some(WindowPosition::new(321.0, 123.0)));
    assert_eq!(snapped.previous_size, Some(WindowSize::new(640.0, 480.0)));

    store.toggle_maximize("A");

    let a = store.get_window("A").expect("A");
    assert!(!a.is_maximized);
    assert_eq!(a.position, WindowPosition::new(321.0, 123.0));
    assert_eq!(a.size, WindowSize::new(640.0, 480.0));
    assert_eq!(a.previous_position, None);
    assert_eq!(a.previous_size, None);
}

#[test]
fn snap_then_maximize_round_trip_returns_to_snapped_bounds() {
    let mut store = mounted();
    store.snap_window("A", Some(SnapZone::Left));
    let snapped = store.get_window("A").expect("A").clone();
    assert_eq!(snapped.position, WindowPosition::new(0.0, 0.0));
    assert_eq!(snapped.size, WindowSize::new(600.0, 900.0));

    store.toggle_maximize("A");
    store.toggle_maximize("A");

    let a = store.get_window("A").expect("A");
    assert_eq!(a.position, snapped.position);
    assert_eq!(a.size, snapped.size);
}

#[test]
fn snap_out_of_maximize_keeps_saved_geometry_until_next_maximize() {
    let mut store = mounted();
    store.toggle_maximize("A");
    store.snap_window("A", Some(SnapZone::BottomRight));

    let snapped = store.get_window("A").expect("A").clone();
    assert!(!snapped.is_maximized);
    assert_eq!(snapped.position, WindowPosition::new(600.0, 450.0));
    assert_eq!(snapped.previous_position, Some(WindowPosition::new(100.0, 80.0)));

    store.toggle_maximize("A");
    store.toggle_maximize("A");

    let a = store.get_window("A").expect("A");
    assert_eq!(a.position, WindowPosition::new(600.0, 450.0));
    assert_eq!(a.size, WindowSize::new(600.0, 450.0));
}

#[test]
fn unknown_ids_leave_state_unchanged() {
    let prefs = MemoryPrefsStore::default();
    let mut store = WindowStore::with_prefs(Rc::new(prefs.clone()), Default::default());
    store.initialize_windows(&registry(), &|key| key.to_string(), VIEWPORT);
    let before = store.state().clone();
    let written = prefs.raw(LAYOUT_STORAGE_KEY);

    store.open_window("nope");
    store.close_window("nope");
    store.bring_to_front("nope");
    store.toggle_minimize("nope");
    store.toggle_maximize("nope");
    store.update_window_position("nope", 1.0, 2.0);
    store.update_window_size("nope", 1.0, 2.0);
    store.snap_window("nope", Some(SnapZone::Top));

    assert_eq!(store.state(), &before);
    assert_eq!(prefs.raw(LAYOUT_STORAGE_KEY), written);
}

#[test]
fn reload_never_restores_minimized_or_maximized_state() {
    let prefs = MemoryPrefsStore::default();
    let mut store = WindowStore::with_prefs(Rc::new(prefs.clone()), Default::default());
    store.initialize_windows(&registry(), &|key| key.to_string(), VIEWPORT);
    store.open_window("B");
    store.toggle_maximize("B");
    store.toggle_minimize("A");

    let mut reloaded = WindowStore::with_prefs(Rc::new(prefs), Default::default());
    reloaded.initialize_windows(&registry(), &|key| key.to_string(), VIEWPORT);

    let a = reloaded.get_window("A").expect("A");
    let b = reloaded.get_window("B").expect("B");
    assert!(a.is_open && !a.is_minimized);
    assert!(b.is_open && !b.is_maximized);
    assert_eq!(b.size, WindowSize::new(1200.0, 900.0));
    assert_eq!(b.previous_size, None);
    assert_eq!(reloaded.get_open_windows().len(), 2);
}

#[test]
fn corrupt_storage_falls_back_to_registry_defaults() {
    let prefs = MemoryPrefsStore::with_entry(LAYOUT_STORAGE_KEY, "not json at all");
    let mut store = WindowStore::with_prefs(Rc::new(prefs), Default::default());
    store.initialize_windows(&registry(), &|key| key.to_string(), VIEWPORT);

    assert_eq!(
        store.get_window("A").expect("A").position,
        WindowPosition::new(100.0, 80.0)
    );
    assert_eq!(store.highest_z_index(), 2);
}

#[test]
fn out_of_range_stored_z_index_falls_back_and_keeps_focus_consistent() {
    let prefs = MemoryPrefsStore::with_entry(
        LAYOUT_STORAGE_KEY,
        r#"{"windows":{"A":{"isOpen":true,"zIndex":4294967295},"B":{"isOpen":true,"zIndex":7}}}"#,
    );
    let mut store = WindowStore::with_prefs(Rc::new(prefs), Default::default());
    store.initialize_windows(&registry(), &|key| key.to_string(), VIEWPORT);

    assert_eq!(store.get_window("A").expect("A").z_index, 1);
    assert_eq!(store.get_window("B").expect("B").z_index, 7);
    assert_eq!(store.highest_z_index(), 8);

    store.bring_to_front("A");
    assert_eq!(store.get_window("A").expect("A").z_index, 9);
    assert!(store.is_focused("A"));
    assert!(!store.is_focused("B"));
}
