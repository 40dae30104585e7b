pub mod app;
pub mod cache;
pub mod components;
pub mod config;
pub mod controller;
pub mod feed;
pub mod format;
pub mod labels;
pub mod mount;
pub mod pagination;
pub mod posts;
pub mod seo;
pub mod server_fn;
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
