use async_trait::async_trait;

use crate::db::models::{Category, CategoryScope};
use crate::error::AppError;

/// Repository trait for display categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List categories sorted by name, optionally restricted to one scope.
    async fn list(&self, scope: Option<CategoryScope>) -> Result<Vec<Category>, AppError>;

    /// Create a category or replace the one with the same id.
    async fn upsert(&self, category: Category) -> Result<(), AppError>;

    /// Delete a category. Returns `false` when it did not exist.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// MongoDB implementation of the CategoryRepository.
#[cfg(feature = "ssr")]
pub struct MongoCategoryRepository {
    collection: mongodb::Collection<Category>,
}

#[cfg(feature = "ssr")]
impl MongoCategoryRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("categories"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn list(&self, scope: Option<CategoryScope>) -> Result<Vec<Category>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let filter = match scope {
            Some(scope) => {
                let scope = bson::to_bson(&scope).map_err(|e| AppError::Internal(e.to_string()))?;
                doc! { "scope": scope }
            }
            None => doc! {},
        };
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert(&self, category: Category) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "id": &category.id }, &category)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
