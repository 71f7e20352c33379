#![allow(dead_code)]

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use spolder::config::SiteConfig;
use spolder::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// Holds the application state and the Axum router for integration tests.
///
/// When backed by MongoDB, the container is kept alive for as long as this
/// struct lives and is cleaned up when dropped.
pub struct TestEnv {
    _mongo: Option<ContainerAsync<Mongo>>,
    /// The backing database when started with [`TestEnv::start_mongo`].
    pub db: Option<mongodb::Database>,
    pub state: AppState,
    pub router: Router,
}

fn leptos_options() -> leptos::prelude::LeptosOptions {
    leptos::prelude::LeptosOptions::builder()
        .output_name("spolder")
        .build()
}

fn api_router(state: &AppState) -> Router {
    // API routes only, no Leptos SSR
    spolder::api::router().with_state(state.clone())
}

impl TestEnv {
    /// In-memory storage with the default configuration.
    pub fn start() -> Self {
        let state = AppState::in_memory(&SiteConfig::default(), leptos_options());
        Self {
            _mongo: None,
            db: None,
            router: api_router(&state),
            state,
        }
    }

    /// Storage in a fresh MongoDB container.
    pub async fn start_mongo() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("spolder_test");

        let state = AppState::with_mongo(&mongo_db, &SiteConfig::default(), leptos_options());
        Self {
            _mongo: Some(mongo_container),
            db: Some(mongo_db),
            router: api_router(&state),
            state,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }
}

/// Helper: log in as the default admin so the session cookie is saved.
pub async fn login(server: &axum_test::TestServer) {
    server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": ADMIN_USERNAME,
            "password": ADMIN_PASSWORD
        }))
        .await
        .assert_status_ok();
}

/// Helper: create a record through the admin API and return its JSON.
pub async fn create(
    server: &axum_test::TestServer,
    collection: &str,
    fields: serde_json::Value,
) -> serde_json::Value {
    let response = server
        .post(&format!("/api/v1/admin/{}", collection))
        .json(&fields)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Helper: create a record and publish it.
pub async fn create_published(
    server: &axum_test::TestServer,
    collection: &str,
    mut fields: serde_json::Value,
) -> serde_json::Value {
    fields["status"] = "published".into();
    create(server, collection, fields).await
}
