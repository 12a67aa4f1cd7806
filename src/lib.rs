#![recursion_limit = "256"]

pub mod app;
pub mod error;
pub mod db {
    pub mod merchant_repository;
    pub mod models;
    pub mod settings_repository;
}
pub mod auth {
    pub mod config;
    pub mod models;
    pub mod session;
}
pub mod api {
    pub mod errors;
    pub mod stream;
}
pub mod components {
    pub mod admin_panel;
    pub mod chrome;
    pub mod contact;
    pub mod live;
    pub mod merchant_grid;
    pub mod page_effects;
    pub mod toast;
}

#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "ssr")]
pub mod demo_seeder;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
