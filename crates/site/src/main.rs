//! Binary entrypoint for the browser-hosted desktop portfolio.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This binary targets the browser. Build `site_app` for wasm32 with the `csr` feature (for example via `trunk serve`).");
}
