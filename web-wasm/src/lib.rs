//! Youth Opportunity Finder Web App (Leptos + WASM)

mod app;
mod components;
mod api;
mod export;
mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
