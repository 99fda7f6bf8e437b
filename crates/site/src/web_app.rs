use std::rc::Rc;

use desktop_app_contract::TerminalContext;
use desktop_runtime::{DesktopProvider, DesktopShell, ShortcutBindings};
use leptos::*;
use leptos_meta::*;
use system_shell_contract::TerminalSession;

use crate::{
    registry::{portfolio_registry, ABOUT_WINDOW, PROFILE_WINDOW, TERMINAL_WINDOW},
    terminal::PortfolioShell,
    titles::title_for,
};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="guest@portfolio" />
        <Meta name="description" content="A desktop-style portfolio running in the browser." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let registry = match portfolio_registry() {
        Ok(registry) => Rc::new(registry),
        Err(err) => {
            logging::error!("window registry rejected: {err}");
            return view! { <p class="site-error">"The desktop failed to start."</p> }.into_view();
        }
    };
    let shell = PortfolioShell::new(Rc::new(platform_host_web::prefs_store()));
    let terminal = TerminalContext::new(TerminalSession::default(), Rc::new(shell));
    let bindings = ShortcutBindings {
        terminal: TERMINAL_WINDOW.into(),
        about: ABOUT_WINDOW.into(),
        profile: PROFILE_WINDOW.into(),
    };

    view! {
        <DesktopProvider
            registry=registry
            titles=|key: String| title_for(&key)
            terminal=terminal
            bindings=bindings
        >
            <DesktopShell />
        </DesktopProvider>
    }
    .into_view()
}
