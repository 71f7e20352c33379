use async_trait::async_trait;

use crate::content::record::ContentType;
use crate::db::models::RawRecord;
use crate::error::AppError;

/// Restriction applied when reading published records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishedFilter {
    /// Only return records flagged for the home slider.
    pub featured_only: bool,
}

/// Read contract of the backing store.
///
/// Implementations return published records of one collection, newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch_published(
        &self,
        content_type: ContentType,
        filter: PublishedFilter,
    ) -> Result<Vec<RawRecord>, AppError>;
}

/// Fetches one collection, degrading any store failure to an empty result.
#[derive(Clone, Copy)]
pub struct CollectionFetcher<'a> {
    store: &'a dyn ContentStore,
}

impl<'a> CollectionFetcher<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self { store }
    }

    pub async fn fetch(&self, content_type: ContentType, filter: PublishedFilter) -> Vec<RawRecord> {
        match self.store.fetch_published(content_type, filter).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    collection = content_type.collection(),
                    error = %e,
                    "Failed to fetch collection, treating it as empty"
                );
                Vec::new()
            }
        }
    }
}
