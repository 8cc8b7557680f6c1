//! Web UI for inventario
//!
//! A Yew-based page where batches are pasted as text, shown in a
//! colour-coded table ordered by expiry, searched, exported and removed.
//! The collection is kept in the browser's local storage.

mod app;
mod components;
mod download;
mod storage;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();

    yew::Renderer::<app::App>::new().render();
}
