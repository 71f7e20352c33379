use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Donation account shown on the membership page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankInfo {
    #[serde(default, alias = "bankName")]
    pub bank_name: String,
    #[serde(default, alias = "accountHolder")]
    pub account_holder: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default, alias = "accountNumber")]
    pub account_number: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub swift: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Site-wide settings stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Settings document key (always "global").
    #[serde(default = "global_key")]
    pub key: String,
    #[serde(default)]
    pub bank: BankInfo,
    #[serde(default)]
    pub contact: ContactInfo,
}

fn global_key() -> String {
    "global".to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            key: global_key(),
            bank: BankInfo::default(),
            contact: ContactInfo::default(),
        }
    }
}

impl SiteSettings {
    /// Check the IBAN shape: `TR` followed by 24 digits, spaces ignored.
    /// An empty IBAN is allowed.
    pub fn validate(&self) -> Result<(), AppError> {
        let iban: String = self.bank.iban.split_whitespace().collect();
        if iban.is_empty() {
            return Ok(());
        }
        let upper = iban.to_uppercase();
        let valid = upper.len() == 26
            && upper.starts_with("TR")
            && upper[2..].chars().all(|c| c.is_ascii_digit());
        if valid {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "IBAN '{}' must be TR followed by 24 digits",
                self.bank.iban
            )))
        }
    }
}

/// Repository trait for site settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get the global settings, or defaults when none were saved.
    async fn get_settings(&self) -> Result<SiteSettings, AppError>;

    /// Replace the global settings.
    async fn save_settings(&self, settings: SiteSettings) -> Result<(), AppError>;
}

/// MongoDB implementation of the SettingsRepository.
#[cfg(feature = "ssr")]
pub struct MongoSettingsRepository {
    collection: mongodb::Collection<SiteSettings>,
}

#[cfg(feature = "ssr")]
impl MongoSettingsRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("settings"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl SettingsRepository for MongoSettingsRepository {
    async fn get_settings(&self) -> Result<SiteSettings, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .find_one(doc! { "key": "global" })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.unwrap_or_default())
    }

    async fn save_settings(&self, mut settings: SiteSettings) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        settings.key = global_key();
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "key": "global" }, &settings)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
