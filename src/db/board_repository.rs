use async_trait::async_trait;

use crate::db::models::BoardMember;
use crate::error::AppError;

/// Repository trait for the board member list.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Every member, by ascending `order` and then by name.
    async fn list(&self) -> Result<Vec<BoardMember>, AppError>;

    async fn find(&self, id: &str) -> Result<Option<BoardMember>, AppError>;

    /// Insert a member or replace the one with the same id.
    async fn upsert(&self, member: BoardMember) -> Result<(), AppError>;

    /// Delete a member. Returns `false` when it did not exist.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// Sort key shared by every implementation.
pub fn sort_members(members: &mut [BoardMember]) {
    members.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(feature = "ssr")]
pub struct MongoBoardRepository {
    collection: mongodb::Collection<BoardMember>,
}

#[cfg(feature = "ssr")]
impl MongoBoardRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(crate::admin::schema::BOARD_COLLECTION),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl BoardRepository for MongoBoardRepository {
    async fn list(&self) -> Result<Vec<BoardMember>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "order": 1, "name": 1 })
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

    async fn find(&self, id: &str) -> Result<Option<BoardMember>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert(&self, member: BoardMember) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "id": &member.id }, &member)
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
