use super::*;
use crate::{
    desktop::{apply_chrome_event, ChromeEvent},
    interaction::InteractionController,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn capture_pointer(ev: &web_sys::PointerEvent) {
    let Some(element) = ev
        .current_target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return;
    };
    let _ = element.set_pointer_capture(ev.pointer_id());
}

#[cfg(not(target_arch = "wasm32"))]
fn capture_pointer(_: &web_sys::PointerEvent) {}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let store = runtime.store;
    let interaction = runtime.interaction;
    let id = store_value(window_id);

    let window = Signal::derive(move || {
        id.with_value(|id| store.with(|store| store.get_window(id.as_str()).cloned()))
    });
    let focused = Signal::derive(move || {
        id.with_value(|id| store.with(|store| store.is_focused(id.as_str())))
    });
    let bounds = Signal::derive(move || {
        let record = window.get()?;
        let live = interaction.with(|controller| {
            controller
                .as_ref()
                .filter(|controller| controller.window_id() == &record.id)
                .map(|controller| controller.bounds(&record))
        });
        Some(live.unwrap_or_else(|| record.bounds()))
    });

    let chrome = move |event: ChromeEvent| {
        id.with_value(|id| {
            runtime.update_store(|store| apply_chrome_event(store, id.as_str(), event));
        });
    };

    let focus = move |_: web_sys::PointerEvent| {
        if !focused.get_untracked() {
            chrome(ChromeEvent::Focus);
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) || interaction.with_untracked(Option::is_some) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        let mut controller = InteractionController::new(id.get_value(), runtime.config());
        let pointer = pointer_from_pointer_event(&ev);
        let started = runtime
            .update_store(|store| controller.begin_drag(store, pointer))
            .unwrap_or(false);
        if started {
            capture_pointer(&ev);
            interaction.set(Some(controller));
        }
    };
    let begin_resize = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) || interaction.with_untracked(Option::is_some) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        let mut controller = InteractionController::new(id.get_value(), runtime.config());
        let pointer = pointer_from_pointer_event(&ev);
        let started = runtime
            .update_store(|store| controller.begin_resize(store, pointer))
            .unwrap_or(false);
        if started {
            capture_pointer(&ev);
            interaction.set(Some(controller));
        }
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        chrome(ChromeEvent::Maximize);
    };

    let body = id
        .with_value(|id| {
            runtime
                .desktop
                .with_value(|desktop| desktop.render(id.as_str(), runtime.host.get_value()))
        })
        .unwrap_or_else(|| view! { <p>"Unavailable"</p> }.into_view());

    let title = move || window.get().map(|w| w.title).unwrap_or_default();
    let is_maximized = move || window.get().is_some_and(|w| w.is_maximized);
    let class_name = move || {
        let focused_class = if focused.get() { " focused" } else { "" };
        let maximized_class = if is_maximized() { " maximized" } else { "" };
        format!("desktop-window{focused_class}{maximized_class}")
    };
    let style = move || {
        let z_index = window.get().map_or(0, |w| w.z_index);
        bounds
            .get()
            .map(|rect| {
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    rect.position.x, rect.position.y, rect.size.width, rect.size.height, z_index
                )
            })
            .unwrap_or_default()
    };

    view! {
        <section
            class=class_name
            style=style
            on:pointerdown=focus
            role="dialog"
            aria-label=title
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-controls">
                    <button
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            chrome(ChromeEvent::Close);
                        }
                    />
                    <button
                        class="titlebar-minimize"
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            chrome(ChromeEvent::Minimize);
                        }
                    />
                    <button
                        class="titlebar-maximize"
                        aria-label=move || {
                            if is_maximized() { "Restore window" } else { "Maximize window" }
                        }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            chrome(ChromeEvent::Maximize);
                        }
                    />
                </div>
                <span class="titlebar-title">{title}</span>
            </header>
            <div class="window-body">{body}</div>
            <Show when=move || window.get().is_some() && !is_maximized() fallback=|| ()>
                <div
                    class="window-resize-handle"
                    aria-hidden="true"
                    on:pointerdown=begin_resize
                />
            </Show>
        </section>
    }
}
