use std::collections::HashSet;

use futures::future::join_all;

use crate::content::fetcher::{CollectionFetcher, ContentStore, PublishedFilter};
use crate::content::record::{ContentRecord, ContentType};

/// Collections rotated by the home slider.
pub const SLIDER_SCOPE: &[ContentType] = &[ContentType::Event, ContentType::News, ContentType::Project];

/// Collections covered by the header suggestions and the search page.
pub const SEARCH_SCOPE: &[ContentType] = &[ContentType::News, ContentType::Blog];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    pub featured_only: bool,
}

/// Merges several collections into one date-descending sequence.
pub struct Aggregator<'a> {
    fetcher: CollectionFetcher<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self {
            fetcher: CollectionFetcher::new(store),
        }
    }

    /// Fetch, normalize, de-duplicate and sort the requested collections.
    ///
    /// Never fails: unavailable collections contribute nothing and malformed
    /// records are dropped.
    pub async fn aggregate(
        &self,
        content_types: &[ContentType],
        options: AggregateOptions,
    ) -> Vec<ContentRecord> {
        let mut requested: Vec<ContentType> = Vec::with_capacity(content_types.len());
        for content_type in content_types {
            if !requested.contains(content_type) {
                requested.push(*content_type);
            }
        }

        let filter = PublishedFilter {
            featured_only: options.featured_only,
        };
        let batches = join_all(
            requested
                .iter()
                .map(|content_type| self.fetcher.fetch(*content_type, filter)),
        )
        .await;

        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for (content_type, batch) in requested.iter().zip(batches) {
            for raw in batch {
                if raw.content_type() != *content_type {
                    tracing::debug!(
                        collection = content_type.collection(),
                        id = raw.id(),
                        "Dropping record of foreign type"
                    );
                    continue;
                }
                let record = match raw.normalize() {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::debug!(
                            collection = content_type.collection(),
                            error = %e,
                            "Dropping malformed record"
                        );
                        continue;
                    }
                };
                // The store is asked to filter, but the invariants are enforced here too.
                if !record.is_public() || (options.featured_only && !record.featured) {
                    continue;
                }
                if seen.insert((record.content_type, record.id.clone())) {
                    records.push(record);
                }
            }
        }

        // `sort_by` is stable: equal dates keep fetch order.
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        records
    }
}
