//! In-process repositories, used by the `memory` storage backend and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::content::fetcher::{ContentStore, PublishedFilter};
use crate::content::record::{ContentType, PublicationStatus};
use crate::db::activity_repository::ActivityRepository;
use crate::db::board_repository::{sort_members, BoardRepository};
use crate::db::category_repository::CategoryRepository;
use crate::db::models::{ActivityEntry, BoardMember, Category, CategoryScope, RawRecord};
use crate::db::repository::ContentRepository;
use crate::db::settings_repository::{SettingsRepository, SiteSettings};
use crate::error::AppError;

#[derive(Default)]
pub struct InMemoryContentRepository {
    collections: RwLock<HashMap<ContentType, Vec<RawRecord>>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first(
        &self,
        content_type: ContentType,
        keep: impl Fn(&RawRecord) -> bool,
    ) -> Vec<RawRecord> {
        let collections = self.collections.read().await;
        let mut records: Vec<RawRecord> = collections
            .get(&content_type)
            .map(|records| records.iter().filter(|&r| keep(r)).cloned().collect())
            .unwrap_or_default();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        records
    }
}

#[async_trait]
impl ContentStore for InMemoryContentRepository {
    async fn fetch_published(
        &self,
        content_type: ContentType,
        filter: PublishedFilter,
    ) -> Result<Vec<RawRecord>, AppError> {
        Ok(self
            .newest_first(content_type, |r| {
                r.status() == PublicationStatus::Published && (!filter.featured_only || r.featured())
            })
            .await)
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list(&self, content_type: ContentType) -> Result<Vec<RawRecord>, AppError> {
        Ok(self.newest_first(content_type, |_| true).await)
    }

    async fn find(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<Option<RawRecord>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&content_type)
            .and_then(|records| records.iter().find(|r| r.id() == id))
            .cloned())
    }

    async fn upsert(&self, record: RawRecord) -> Result<(), AppError> {
        let mut collections = self.collections.write().await;
        let records = collections.entry(record.content_type()).or_default();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    async fn delete_many(
        &self,
        content_type: ContentType,
        ids: &[String],
    ) -> Result<u64, AppError> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(&content_type) else {
            return Ok(0);
        };
        let before = records.len();
        records.retain(|r| !ids.iter().any(|id| id == r.id()));
        Ok((before - records.len()) as u64)
    }

    async fn set_status(
        &self,
        content_type: ContentType,
        id: &str,
        status: PublicationStatus,
    ) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let record = collections
            .get_mut(&content_type)
            .and_then(|records| records.iter_mut().find(|r| r.id() == id));
        match record {
            Some(record) => {
                record.set_status(status);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self, scope: Option<CategoryScope>) -> Result<Vec<Category>, AppError> {
        let categories = self.categories.read().await;
        let mut list: Vec<Category> = categories
            .iter()
            .filter(|c| scope.is_none_or(|scope| c.scope == scope))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn upsert(&self, category: Category) -> Result<(), AppError> {
        let mut categories = self.categories.write().await;
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => categories.push(category),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut categories = self.categories.write().await;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryActivityRepository {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn record(&self, entry: ActivityEntry) -> Result<(), AppError> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryBoardRepository {
    members: RwLock<Vec<BoardMember>>,
}

impl InMemoryBoardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn list(&self) -> Result<Vec<BoardMember>, AppError> {
        let mut members = self.members.read().await.clone();
        sort_members(&mut members);
        Ok(members)
    }

    async fn find(&self, id: &str) -> Result<Option<BoardMember>, AppError> {
        let members = self.members.read().await;
        Ok(members.iter().find(|m| m.id == id).cloned())
    }

    async fn upsert(&self, member: BoardMember) -> Result<(), AppError> {
        let mut members = self.members.write().await;
        match members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => members.push(member),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|m| m.id != id);
        Ok(members.len() != before)
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<Option<SiteSettings>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get_settings(&self) -> Result<SiteSettings, AppError> {
        Ok(self.settings.read().await.clone().unwrap_or_default())
    }

    async fn save_settings(&self, settings: SiteSettings) -> Result<(), AppError> {
        *self.settings.write().await = Some(settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn news(id: &str, status: &str, featured: bool, age_minutes: i64) -> RawRecord {
        let mut fields = serde_json::Map::new();
        fields.insert("id".into(), id.into());
        fields.insert("title".into(), format!("Haber {id}").into());
        fields.insert("date".into(), "2024-12-12".into());
        fields.insert("status".into(), status.into());
        fields.insert("featured".into(), featured.into());
        fields.insert(
            "created_at".into(),
            (Utc::now() - Duration::minutes(age_minutes)).to_rfc3339().into(),
        );
        RawRecord::from_fields(ContentType::News, fields).unwrap()
    }

    fn ids(records: &[RawRecord]) -> Vec<&str> {
        records.iter().map(RawRecord::id).collect()
    }

    #[tokio::test]
    async fn test_fetch_published_filters_and_orders() {
        let repo = InMemoryContentRepository::new();
        repo.upsert(news("old", "published", false, 30)).await.unwrap();
        repo.upsert(news("draft", "draft", true, 20)).await.unwrap();
        repo.upsert(news("new", "published", true, 10)).await.unwrap();

        let all = repo
            .fetch_published(ContentType::News, PublishedFilter::default())
            .await
            .unwrap();
        assert_eq!(ids(&all), vec!["new", "old"]);

        let featured = repo
            .fetch_published(ContentType::News, PublishedFilter { featured_only: true })
            .await
            .unwrap();
        assert_eq!(ids(&featured), vec!["new"]);

        let listed = repo.list(ContentType::News).await.unwrap();
        assert_eq!(ids(&listed), vec!["new", "draft", "old"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let repo = InMemoryContentRepository::new();
        repo.upsert(news("1", "draft", false, 0)).await.unwrap();
        repo.upsert(news("1", "published", false, 0)).await.unwrap();

        let listed = repo.list(ContentType::News).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status(), PublicationStatus::Published);
    }

    #[tokio::test]
    async fn test_set_status_and_delete_many() {
        let repo = InMemoryContentRepository::new();
        repo.upsert(news("1", "draft", false, 0)).await.unwrap();
        repo.upsert(news("2", "draft", false, 0)).await.unwrap();

        assert!(repo
            .set_status(ContentType::News, "1", PublicationStatus::Published)
            .await
            .unwrap());
        assert!(!repo
            .set_status(ContentType::News, "missing", PublicationStatus::Published)
            .await
            .unwrap());

        let deleted = repo
            .delete_many(ContentType::News, &["1".into(), "missing".into()])
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert!(repo.find(ContentType::News, "1").await.unwrap().is_none());
        assert!(repo.find(ContentType::News, "2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_categories_by_scope() {
        let repo = InMemoryCategoryRepository::new();
        for (id, name, scope) in [
            ("1", "Raporlar", CategoryScope::News),
            ("2", "Çalıştay", CategoryScope::Events),
            ("3", "Analiz", CategoryScope::News),
        ] {
            repo.upsert(Category {
                id: id.into(),
                name: name.into(),
                scope,
                color: "#3B82F6".into(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        let news: Vec<String> = repo
            .list(Some(CategoryScope::News))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(news, vec!["Analiz", "Raporlar"]);
        assert_eq!(repo.list(None).await.unwrap().len(), 3);

        assert!(repo.delete("2").await.unwrap());
        assert!(!repo.delete("2").await.unwrap());
    }

    #[tokio::test]
    async fn test_board_sorted_by_order_then_name() {
        let repo = InMemoryBoardRepository::new();
        for (id, name, order) in [("3", "Dr. Mehmet Kaya", 3), ("1", "Zeynep Arslan", 1), ("2", "Ayşe Demir", 1)] {
            repo.upsert(BoardMember {
                id: id.into(),
                name: name.into(),
                position: "Üye".into(),
                bio: String::new(),
                image: None,
                order,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
        assert!(repo.find("3").await.unwrap().is_some());
        assert!(repo.delete("3").await.unwrap());
        assert!(!repo.delete("3").await.unwrap());
    }

    #[tokio::test]
    async fn test_activity_recent_is_newest_first() {
        use crate::db::models::ActivityAction;

        let repo = InMemoryActivityRepository::new();
        for title in ["a", "b", "c"] {
            repo.record(ActivityEntry {
                id: title.into(),
                action: ActivityAction::Create,
                entity: "news".into(),
                title: title.into(),
                at: Utc::now(),
            })
            .await
            .unwrap();
        }
        let titles: Vec<String> = repo
            .recent(2)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_settings_default_then_saved() {
        let repo = InMemorySettingsRepository::new();
        assert_eq!(repo.get_settings().await.unwrap(), SiteSettings::default());

        let mut settings = SiteSettings::default();
        settings.bank.bank_name = "Ziraat Bankası".into();
        repo.save_settings(settings.clone()).await.unwrap();
        assert_eq!(repo.get_settings().await.unwrap(), settings);
    }
}
