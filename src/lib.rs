pub mod admin;
pub mod api;
pub mod app;
pub mod auth;
pub mod components {
    pub mod board_page;
    pub mod content_card;
    pub mod content_pages;
    pub mod hero_slider;
    pub mod publications_page;
    pub mod search_bar;
    pub mod search_page;
}
pub mod content;
pub mod db;
pub mod error;
pub mod rendering {
    pub mod markdown;
}

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod demo_seeder;
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "ssr")]
pub mod ssr_utils {
    use leptos::prelude::{use_context, ServerFnError};

    use crate::state::AppState;

    /// Application state provided to server functions by the Leptos router.
    pub fn app_state() -> Result<AppState, ServerFnError> {
        use_context::<AppState>().ok_or_else(|| ServerFnError::new("AppState not found in context"))
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
