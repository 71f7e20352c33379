pub mod errors;

#[cfg(feature = "ssr")]
pub mod admin;
#[cfg(feature = "ssr")]
pub mod content;

/// JSON API routes: public content lookup, admin CRUD and admin login.
#[cfg(feature = "ssr")]
pub fn router() -> axum::Router<crate::state::AppState> {
    use axum::routing::{get, post};

    use crate::auth::login;

    axum::Router::new()
        // Public lookup
        .route("/api/v1/slider", get(content::slider_handler))
        .route("/api/v1/search", get(content::search_handler))
        .route("/api/v1/suggest", get(content::suggest_handler))
        .route(
            "/api/v1/content/{content_type}",
            get(content::collection_handler),
        )
        .route(
            "/api/v1/content/{content_type}/{id}",
            get(content::detail_handler),
        )
        .route("/api/v1/publications", get(content::publications_handler))
        .route("/api/v1/board", get(content::board_handler))
        .route(
            "/api/v1/settings/public",
            get(content::public_settings_handler),
        )
        // Admin session
        .route("/api/auth/login", post(login::login_handler))
        .route("/api/auth/me", get(login::me_handler))
        .route("/api/auth/logout", post(login::logout_handler))
        // Admin panel
        .route("/api/v1/admin/dashboard", get(admin::dashboard_handler))
        .route(
            "/api/v1/admin/settings",
            get(admin::get_settings_handler).put(admin::save_settings_handler),
        )
        .route(
            "/api/v1/admin/categories",
            get(admin::list_categories_handler).post(admin::save_category_handler),
        )
        .route(
            "/api/v1/admin/categories/{id}",
            axum::routing::delete(admin::delete_category_handler),
        )
        .route(
            "/api/v1/admin/board",
            get(admin::list_board_handler).post(admin::create_board_member_handler),
        )
        .route(
            "/api/v1/admin/board/{id}",
            get(admin::get_board_member_handler)
                .put(admin::update_board_member_handler)
                .delete(admin::delete_board_member_handler),
        )
        .route(
            "/api/v1/admin/schema/{collection}",
            get(admin::schema_handler),
        )
        .route(
            "/api/v1/admin/{content_type}",
            get(admin::list_handler).post(admin::create_handler),
        )
        .route(
            "/api/v1/admin/{content_type}/bulk-delete",
            post(admin::bulk_delete_handler),
        )
        .route(
            "/api/v1/admin/{content_type}/{id}",
            get(admin::get_handler)
                .put(admin::update_handler)
                .delete(admin::delete_handler),
        )
        .route(
            "/api/v1/admin/{content_type}/{id}/toggle-publish",
            post(admin::toggle_publish_handler),
        )
}
