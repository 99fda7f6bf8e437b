//! Desktop shell UI composition and interaction surfaces.

mod window;

use desktop_app_contract::WindowId;
use leptos::*;

use self::window::DesktopWindow;

use crate::{
    model::{PointerPosition, ViewMode},
    reducer::WindowAction,
    shortcuts::{handle_shortcut, KeyChord},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[cfg(target_arch = "wasm32")]
fn event_targets_text_field(ev: &web_sys::KeyboardEvent) -> bool {
    use wasm_bindgen::JsCast;

    let Some(element) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return false;
    };
    matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA") || element.is_content_editable()
}

#[cfg(not(target_arch = "wasm32"))]
fn event_targets_text_field(_: &web_sys::KeyboardEvent) -> bool {
    false
}

fn chord_from_keyboard_event(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        in_text_field: event_targets_text_field(ev),
    }
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn install_global_listeners(runtime: DesktopRuntimeContext) {
    let keydown_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let chord = chord_from_keyboard_event(&ev);
        let bindings = runtime.bindings.get_value();
        let consumed = runtime
            .update_store(|store| handle_shortcut(store, &chord, &bindings))
            .unwrap_or(false);
        if consumed {
            ev.prevent_default();
        }
    });

    let pointermove_listener = window_event_listener(ev::pointermove, move |ev| {
        if runtime.interaction.with_untracked(Option::is_none) {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        let viewport = runtime.store.with_untracked(|store| store.viewport_size());
        runtime.interaction.update(|controller| {
            if let Some(controller) = controller {
                controller.pointer_move(viewport, pointer);
            }
        });
    });

    let pointerup_listener = window_event_listener(ev::pointerup, move |_| {
        end_active_gesture(runtime);
    });
    let pointercancel_listener = window_event_listener(ev::pointercancel, move |_| {
        end_active_gesture(runtime);
    });

    on_cleanup(move || {
        keydown_listener.remove();
        pointermove_listener.remove();
        pointerup_listener.remove();
        pointercancel_listener.remove();
    });
}

fn end_active_gesture(runtime: DesktopRuntimeContext) {
    if runtime.interaction.with_untracked(Option::is_none) {
        return;
    }
    let controller = runtime.interaction.try_update(Option::take).flatten();
    if let Some(mut controller) = controller {
        runtime.update_store(|store| controller.pointer_up(store));
    }
}

#[component]
/// Renders the desktop: the window layer in desktop mode, or a flat content list when simplified.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;
    install_global_listeners(runtime);

    let view_mode = Signal::derive(move || store.with(|store| store.view_mode()));
    let toggle_view_mode = move |_| runtime.dispatch_action(WindowAction::ToggleViewMode);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-view-mode=move || match view_mode.get() {
                ViewMode::Desktop => "desktop",
                ViewMode::Simplified => "simplified",
            }
        >
            <button class="view-mode-toggle" on:click=toggle_view_mode>
                {move || match view_mode.get() {
                    ViewMode::Desktop => "Simplified view",
                    ViewMode::Simplified => "Desktop view",
                }}
            </button>
            <Show
                when=move || view_mode.get() == ViewMode::Desktop
                fallback=|| view! { <SimplifiedDesktop /> }
            >
                <DesktopWindowLayer />
            </Show>
        </div>
    }
}

#[component]
fn DesktopWindowLayer() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;
    let windows = move || {
        runtime
            .desktop
            .with_value(|desktop| store.with(|store| desktop.rendered_windows(store)))
    };

    view! {
        <div class="desktop-window-layer">
            <For each=windows key=|win| win.id.clone() let:win>
                <DesktopWindow window_id=win.id />
            </For>
            <SnapPreview />
        </div>
    }
}

#[component]
fn SnapPreview() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let preview = Signal::derive(move || {
        let viewport = runtime.store.with(|store| store.viewport_size());
        runtime.interaction.with(|controller| {
            controller
                .as_ref()
                .and_then(|controller| controller.snap_preview_bounds(viewport))
        })
    });

    view! {
        {move || {
            preview
                .get()
                .map(|bounds| {
                    view! {
                        <div
                            class="snap-preview"
                            aria-hidden="true"
                            style=format!(
                                "left:{}px;top:{}px;width:{}px;height:{}px;",
                                bounds.position.x,
                                bounds.position.y,
                                bounds.size.width,
                                bounds.size.height
                            )
                        />
                    }
                })
        }}
    }
}

#[component]
fn SimplifiedDesktop() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let host = runtime.host.get_value();
    let sections = runtime.desktop.with_value(|desktop| {
        desktop
            .registry()
            .iter()
            .map(|definition| (definition.id.clone(), definition.title_key.clone()))
            .collect::<Vec<(WindowId, String)>>()
    });

    let sections = sections
        .into_iter()
        .map(|(window_id, title_key)| {
            let title = runtime.store.with_untracked(|store| {
                store
                    .get_window(window_id.as_str())
                    .map(|w| w.title.clone())
                    .unwrap_or(title_key)
            });
            let content = runtime
                .desktop
                .with_value(|desktop| desktop.render(window_id.as_str(), host.clone()))
                .unwrap_or_else(|| ().into_view());
            view! {
                <section class="simplified-section" id=format!("section-{window_id}")>
                    <h2>{title}</h2>
                    {content}
                </section>
            }
        })
        .collect_view();

    view! { <main class="simplified-desktop">{sections}</main> }
}
