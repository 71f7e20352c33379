use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::admin::schema::{descriptor_for, validate, ValidationMode};
use crate::admin::slug::slugify;
use crate::content::record::{ContentType, PublicationStatus};
use crate::db::activity_repository::ActivityRepository;
use crate::db::models::{ActivityAction, ActivityEntry, RawRecord};
use crate::db::repository::ContentRepository;
use crate::error::AppError;

/// Number of activity entries shown on the dashboard.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub content_type: ContentType,
    pub total: usize,
    pub published: usize,
    pub draft: usize,
    pub featured: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub collections: Vec<CollectionStats>,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Admin operations shared by every content type.
pub struct CrudService<'a> {
    content: &'a dyn ContentRepository,
    activity: &'a dyn ActivityRepository,
}

impl<'a> CrudService<'a> {
    pub fn new(content: &'a dyn ContentRepository, activity: &'a dyn ActivityRepository) -> Self {
        Self { content, activity }
    }

    pub async fn list(&self, content_type: ContentType) -> Result<Vec<RawRecord>, AppError> {
        self.content.list(content_type).await
    }

    pub async fn get(&self, content_type: ContentType, id: &str) -> Result<RawRecord, AppError> {
        self.content
            .find(content_type, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", content_type, id)))
    }

    /// Validate and store a new record. Ids and creation times are assigned
    /// here; a missing slug is derived from the title.
    pub async fn create(
        &self,
        content_type: ContentType,
        payload: Map<String, Value>,
    ) -> Result<RawRecord, AppError> {
        let mut fields = validate(&descriptor_for(content_type), payload, ValidationMode::Create)?;

        fields.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
        fields.insert(
            "created_at".into(),
            serde_json::to_value(Utc::now()).map_err(|e| AppError::Internal(e.to_string()))?,
        );
        fill_slug(&mut fields);

        let record = RawRecord::from_fields(content_type, fields)
            .map_err(|e| AppError::BadRequest(format!("Invalid {}: {}", content_type, e)))?;
        self.content.upsert(record.clone()).await?;

        tracing::info!(collection = %content_type, id = record.id(), "Record created");
        self.log(ActivityAction::Create, content_type, record.title()).await;
        Ok(record)
    }

    /// Merge the sent fields over the stored record. `null` clears an
    /// optional field.
    pub async fn update(
        &self,
        content_type: ContentType,
        id: &str,
        payload: Map<String, Value>,
    ) -> Result<RawRecord, AppError> {
        let changes = validate(&descriptor_for(content_type), payload, ValidationMode::Update)?;
        let existing = self.get(content_type, id).await?;

        let mut fields = existing
            .to_fields()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        apply_changes(&mut fields, changes);
        fill_slug(&mut fields);

        let record = RawRecord::from_fields(content_type, fields)
            .map_err(|e| AppError::BadRequest(format!("Invalid {}: {}", content_type, e)))?;
        self.content.upsert(record.clone()).await?;

        tracing::info!(collection = %content_type, id, "Record updated");
        self.log(ActivityAction::Update, content_type, record.title()).await;
        Ok(record)
    }

    pub async fn delete(&self, content_type: ContentType, id: &str) -> Result<(), AppError> {
        let existing = self.get(content_type, id).await?;
        self.content
            .delete_many(content_type, &[id.to_string()])
            .await?;

        tracing::info!(collection = %content_type, id, "Record deleted");
        self.log(ActivityAction::Delete, content_type, existing.title()).await;
        Ok(())
    }

    /// Delete several records at once, returning how many were removed.
    pub async fn bulk_delete(
        &self,
        content_type: ContentType,
        ids: &[String],
    ) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Err(AppError::BadRequest("No ids given".into()));
        }
        let deleted = self.content.delete_many(content_type, ids).await?;

        tracing::info!(collection = %content_type, deleted, "Records deleted");
        self.log(
            ActivityAction::Delete,
            content_type,
            &format!("{} kayıt", deleted),
        )
        .await;
        Ok(deleted)
    }

    /// Flip draft/published and return the updated record.
    pub async fn toggle_publish(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<RawRecord, AppError> {
        let mut record = self.get(content_type, id).await?;
        let status = record.status().toggled();

        if !self.content.set_status(content_type, id, status).await? {
            return Err(AppError::NotFound(format!(
                "{} '{}' not found",
                content_type, id
            )));
        }
        record.set_status(status);

        let action = match status {
            PublicationStatus::Published => ActivityAction::Publish,
            PublicationStatus::Draft => ActivityAction::Unpublish,
        };
        tracing::info!(collection = %content_type, id, status = status.as_str(), "Publication status changed");
        self.log(action, content_type, record.title()).await;
        Ok(record)
    }

    /// Per-collection counts and the latest admin activity.
    pub async fn dashboard(&self) -> Result<Dashboard, AppError> {
        let mut collections = Vec::with_capacity(ContentType::ALL.len());
        for content_type in ContentType::ALL {
            let records = self.content.list(content_type).await?;
            let published = records
                .iter()
                .filter(|r| r.status() == PublicationStatus::Published)
                .count();
            collections.push(CollectionStats {
                content_type,
                total: records.len(),
                published,
                draft: records.len() - published,
                featured: records.iter().filter(|r| r.featured()).count(),
            });
        }

        let recent_activity = match self.activity.recent(RECENT_ACTIVITY_LIMIT).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read activity log");
                Vec::new()
            }
        };

        Ok(Dashboard {
            collections,
            recent_activity,
        })
    }

    async fn log(&self, action: ActivityAction, content_type: ContentType, title: &str) {
        let entry = ActivityEntry {
            id: uuid::Uuid::new_v4().to_string(),
            action,
            entity: content_type.collection().to_string(),
            title: title.to_string(),
            at: Utc::now(),
        };
        if let Err(e) = self.activity.record(entry).await {
            tracing::warn!(collection = %content_type, error = %e, "Failed to record activity");
        }
    }
}

/// Overwrite `fields` with `changes`, dropping the keys set to `null`.
pub(crate) fn apply_changes(fields: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (name, value) in changes {
        if value.is_null() {
            fields.remove(&name);
        } else {
            fields.insert(name, value);
        }
    }
}

/// Derive `slug` from `title` when it is missing or blank.
fn fill_slug(fields: &mut Map<String, Value>) {
    let blank = fields
        .get("slug")
        .and_then(Value::as_str)
        .is_none_or(|slug| slug.trim().is_empty());
    if !blank {
        return;
    }
    if let Some(title) = fields.get("title").and_then(Value::as_str) {
        let slug = slugify(title);
        fields.insert("slug".into(), Value::String(slug));
    }
}
