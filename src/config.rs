use std::path::Path;

use serde::Deserialize;

use crate::auth::credentials::{check_phc_string, DEFAULT_ADMIN_PASSWORD_HASH};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "spolder".to_string(),
        }
    }
}

/// Where content is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Mongo,
    /// Process memory; everything is lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub username: String,
    /// Argon2 PHC string of the admin password
    /// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
    pub password_hash: String,
    pub session_ttl_minutes: u32,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password_hash: DEFAULT_ADMIN_PASSWORD_HASH.to_string(),
            session_ttl_minutes: 8 * 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    pub slide_interval_secs: u64,
    pub suggestion_limit: usize,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            slide_interval_secs: crate::content::slider::SLIDE_INTERVAL.as_secs(),
            suggestion_limit: crate::content::presenter::DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// Server configuration.
///
/// Sources, later ones overriding earlier ones:
/// `config/default.toml`, `config/local.toml`, the file given on the
/// command line, then `SPOLDER__*` environment variables
/// (`SPOLDER__MONGODB__URI`, `SPOLDER__DEMO_MODE`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub mongodb: MongoSettings,
    pub storage: StorageBackend,
    pub admin: AdminSettings,
    pub presentation: PresentationSettings,
    pub demo_mode: bool,
}

impl SiteConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("SPOLDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let site_config: SiteConfig = settings.try_deserialize()?;
        site_config.validate()?;
        Ok(site_config)
    }

    /// Demo and throwaway in-memory servers may keep the default password.
    pub fn allows_default_password(&self) -> bool {
        self.demo_mode || self.storage == StorageBackend::Memory
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.admin.username.trim().is_empty() {
            return Err(AppError::Config("admin.username must not be empty".into()));
        }
        check_phc_string(&self.admin.password_hash)?;
        if self.admin.password_hash == DEFAULT_ADMIN_PASSWORD_HASH && !self.allows_default_password() {
            return Err(AppError::Config(
                "admin.password_hash is the shipped admin/admin hash; set a new one \
                 (spolder --hash-password) or run with demo_mode or storage = \"memory\""
                    .into(),
            ));
        }
        if self.admin.session_ttl_minutes == 0 {
            return Err(AppError::Config("admin.session_ttl_minutes must be positive".into()));
        }
        if self.presentation.slide_interval_secs == 0 {
            return Err(AppError::Config(
                "presentation.slide_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
