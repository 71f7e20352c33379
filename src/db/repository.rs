use async_trait::async_trait;

use crate::content::fetcher::ContentStore;
use crate::content::record::{ContentType, PublicationStatus};
use crate::db::models::RawRecord;
#[cfg(feature = "ssr")]
use crate::db::models::legacy_names;
use crate::error::AppError;

/// Repository trait for content operations used by the admin panel.
///
/// Every repository is also a [`ContentStore`], so the public lookup and the
/// admin screens read from the same place.
#[async_trait]
pub trait ContentRepository: ContentStore {
    /// All records of a collection regardless of status, newest first.
    async fn list(&self, content_type: ContentType) -> Result<Vec<RawRecord>, AppError>;

    /// Find a record by its id.
    async fn find(&self, content_type: ContentType, id: &str)
        -> Result<Option<RawRecord>, AppError>;

    /// Insert a record or replace the one with the same id.
    async fn upsert(&self, record: RawRecord) -> Result<(), AppError>;

    /// Delete the listed records, returning how many existed.
    async fn delete_many(&self, content_type: ContentType, ids: &[String])
        -> Result<u64, AppError>;

    /// Change the publication status. Returns `false` when the id is unknown.
    async fn set_status(
        &self,
        content_type: ContentType,
        id: &str,
        status: PublicationStatus,
    ) -> Result<bool, AppError>;
}

/// MongoDB implementation: one collection per content type.
///
/// Documents are read as raw BSON and decoded one by one, so a single
/// malformed document cannot hide the rest of its collection.
#[cfg(feature = "ssr")]
pub struct MongoContentRepository {
    db: mongodb::Database,
}

#[cfg(feature = "ssr")]
impl MongoContentRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { db: db.clone() }
    }

    fn collection(&self, content_type: ContentType) -> mongodb::Collection<bson::Document> {
        self.db.collection(content_type.collection())
    }

    /// Upsert one document by id, replacing whatever shape it had before.
    async fn replace_document(
        &self,
        content_type: ContentType,
        id: &str,
        document: bson::Document,
    ) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection(content_type)
            .replace_one(doc! { "id": id }, document)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn find_records(
        &self,
        content_type: ContentType,
        filter: bson::Document,
    ) -> Result<Vec<RawRecord>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

        let mut cursor = self
            .collection(content_type)
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            match RawRecord::from_document(content_type, document) {
                Ok(record) => records.push(record),
                Err(e) => tracing::debug!(
                    collection = content_type.collection(),
                    error = %e,
                    "Skipping undecodable document"
                ),
            }
        }

        Ok(records)
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ContentStore for MongoContentRepository {
    async fn fetch_published(
        &self,
        content_type: ContentType,
        filter: crate::content::fetcher::PublishedFilter,
    ) -> Result<Vec<RawRecord>, AppError> {
        use mongodb::bson::doc;

        let published = any_spelling(
            content_type,
            "status",
            doc! { "$in": [PublicationStatus::Published.as_str(), "yayinlandi"] },
        );
        let query = if filter.featured_only {
            let featured = any_spelling(content_type, "featured", doc! { "$eq": true });
            doc! { "$and": [published, featured] }
        } else {
            published
        };
        self.find_records(content_type, query).await
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ContentRepository for MongoContentRepository {
    async fn list(&self, content_type: ContentType) -> Result<Vec<RawRecord>, AppError> {
        self.find_records(content_type, bson::Document::new()).await
    }

    async fn find(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<Option<RawRecord>, AppError> {
        use mongodb::bson::doc;

        let document = self
            .collection(content_type)
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        document
            .map(|document| RawRecord::from_document(content_type, document))
            .transpose()
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert(&self, record: RawRecord) -> Result<(), AppError> {
        let document = record
            .to_document()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.replace_document(record.content_type(), record.id(), document)
            .await
    }

    async fn delete_many(
        &self,
        content_type: ContentType,
        ids: &[String],
    ) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        if ids.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection(content_type)
            .delete_many(doc! { "id": { "$in": ids.to_vec() } })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn set_status(
        &self,
        content_type: ContentType,
        id: &str,
        status: PublicationStatus,
    ) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        // Legacy status keys would shadow the new value on the next read
        let mut update = doc! { "$set": { "status": status.as_str() } };
        let legacy = legacy_names(content_type, "status");
        if !legacy.is_empty() {
            let unset: bson::Document = legacy
                .into_iter()
                .map(|key| (key.to_string(), bson::Bson::String(String::new())))
                .collect();
            update.insert("$unset", unset);
        }

        let result = self
            .collection(content_type)
            .update_one(doc! { "id": id }, update)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.matched_count > 0)
    }
}

/// Match `condition` on the current key or, for documents that never got
/// the current key, on any of its legacy spellings.
#[cfg(feature = "ssr")]
fn any_spelling(content_type: ContentType, current: &str, condition: bson::Document) -> bson::Document {
    use mongodb::bson::doc;

    let mut branches = vec![bson::Bson::Document(doc! { current: condition.clone() })];
    for legacy in legacy_names(content_type, current) {
        branches.push(bson::Bson::Document(doc! {
            legacy: condition.clone(),
            current: { "$exists": false },
        }));
    }
    doc! { "$or": branches }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_any_spelling_covers_legacy_keys() {
        let filter = any_spelling(ContentType::Event, "featured", doc! { "$eq": true });
        assert_eq!(
            filter,
            doc! { "$or": [
                { "featured": { "$eq": true } },
                { "sliderda_goster": { "$eq": true }, "featured": { "$exists": false } }
            ] }
        );
    }

    #[test]
    fn test_any_spelling_without_legacy_keys() {
        let filter = any_spelling(ContentType::Blog, "title", doc! { "$eq": "x" });
        assert_eq!(filter, doc! { "$or": [ { "title": { "$eq": "x" } } ] });
    }
}
