use std::sync::Arc;

use leptos::prelude::LeptosOptions;

use crate::auth::credentials::AdminCredentials;
use crate::auth::session::SessionStore;
use crate::config::{PresentationSettings, SiteConfig};
use crate::content::fetcher::ContentStore;
use crate::db::activity_repository::{ActivityRepository, MongoActivityRepository};
use crate::db::board_repository::{BoardRepository, MongoBoardRepository};
use crate::db::category_repository::{CategoryRepository, MongoCategoryRepository};
use crate::db::memory::{
    InMemoryActivityRepository, InMemoryBoardRepository, InMemoryCategoryRepository,
    InMemoryContentRepository, InMemorySettingsRepository,
};
use crate::db::repository::{ContentRepository, MongoContentRepository};
use crate::db::settings_repository::{MongoSettingsRepository, SettingsRepository};

/// Shared application state for Axum handlers and Leptos server functions.
#[derive(Clone)]
pub struct AppState {
    /// Read side used by the public lookup.
    pub content_store: Arc<dyn ContentStore>,
    /// Same store, with the admin write operations.
    pub content_repo: Arc<dyn ContentRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub board_repo: Arc<dyn BoardRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub sessions: Arc<SessionStore>,
    pub credentials: AdminCredentials,
    pub presentation: PresentationSettings,
    pub leptos_options: LeptosOptions,
}

impl axum::extract::FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl AppState {
    /// State backed by MongoDB collections in `db`.
    pub fn with_mongo(db: &mongodb::Database, config: &SiteConfig, leptos_options: LeptosOptions) -> Self {
        Self::assemble(
            Arc::new(MongoContentRepository::new(db)),
            Arc::new(MongoCategoryRepository::new(db)),
            Arc::new(MongoBoardRepository::new(db)),
            Arc::new(MongoActivityRepository::new(db)),
            Arc::new(MongoSettingsRepository::new(db)),
            config,
            leptos_options,
        )
    }

    /// State kept entirely in process memory.
    pub fn in_memory(config: &SiteConfig, leptos_options: LeptosOptions) -> Self {
        Self::assemble(
            Arc::new(InMemoryContentRepository::new()),
            Arc::new(InMemoryCategoryRepository::new()),
            Arc::new(InMemoryBoardRepository::new()),
            Arc::new(InMemoryActivityRepository::new()),
            Arc::new(InMemorySettingsRepository::new()),
            config,
            leptos_options,
        )
    }

    fn assemble<C>(
        content: Arc<C>,
        category_repo: Arc<dyn CategoryRepository>,
        board_repo: Arc<dyn BoardRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        config: &SiteConfig,
        leptos_options: LeptosOptions,
    ) -> Self
    where
        C: ContentRepository + 'static,
    {
        let ttl = chrono::Duration::minutes(i64::from(config.admin.session_ttl_minutes));
        Self {
            content_store: content.clone(),
            content_repo: content,
            category_repo,
            board_repo,
            activity_repo,
            settings_repo,
            sessions: Arc::new(SessionStore::new(ttl)),
            credentials: AdminCredentials::new(
                config.admin.username.clone(),
                config.admin.password_hash.clone(),
            ),
            presentation: config.presentation.clone(),
            leptos_options,
        }
    }
}
