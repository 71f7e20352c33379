use async_trait::async_trait;

use crate::db::models::ActivityEntry;
use crate::error::AppError;

/// Append-only log of admin mutations.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(&self, entry: ActivityEntry) -> Result<(), AppError>;

    /// The most recent entries, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>, AppError>;
}

#[cfg(feature = "ssr")]
pub struct MongoActivityRepository {
    collection: mongodb::Collection<ActivityEntry>,
}

#[cfg(feature = "ssr")]
impl MongoActivityRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("activity_log"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ActivityRepository for MongoActivityRepository {
    async fn record(&self, entry: ActivityEntry) -> Result<(), AppError> {
        self.collection
            .insert_one(&entry)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "at": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
