mod registry;
mod terminal;
mod titles;
mod web_app;

pub use registry::{portfolio_registry, Project, PROJECTS};
pub use terminal::{PortfolioShell, FILE_TREE_STORAGE_KEY};
pub use titles::title_for;
pub use web_app::{DesktopEntry, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
