//! Browser viewport queries.

/// Viewport width reported when no browser window is available.
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;
/// Viewport height reported when no browser window is available.
pub const FALLBACK_VIEWPORT_HEIGHT: f64 = 800.0;

/// Returns the current `(width, height)` of the browser layout viewport in CSS pixels.
///
/// Falls back to [`FALLBACK_VIEWPORT_WIDTH`] x [`FALLBACK_VIEWPORT_HEIGHT`] outside a browser or
/// when the window reports a non-numeric size.
pub fn viewport_size() -> (f64, f64) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return (FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
        let height = window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);
        (width, height)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        (FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT)
    }
}
