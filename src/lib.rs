#![recursion_limit = "256"]

pub mod app;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    fitdesk_components::logging::init();
    leptos::mount::hydrate_body(App);
}
