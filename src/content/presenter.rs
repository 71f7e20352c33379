use serde::{Deserialize, Serialize};

use crate::content::aggregator::{AggregateOptions, Aggregator, SEARCH_SCOPE, SLIDER_SCOPE};
use crate::content::fetcher::{CollectionFetcher, ContentStore, PublishedFilter};
use crate::content::filter::{filter_records, normalize_query};
use crate::content::record::{ContentRecord, ContentType};
use crate::db::models::RawRecord;

/// Number of suggestions shown under the header search box.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

/// A record as handed to the UI, with its derived link and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentHit {
    #[serde(flatten)]
    pub record: ContentRecord,
    pub link: String,
    pub label: String,
}

impl From<ContentRecord> for ContentHit {
    fn from(record: ContentRecord) -> Self {
        Self {
            link: record.link(),
            label: record.content_type.label().to_string(),
            record,
        }
    }
}

/// Result of the search page. "No query" and "no matches" are distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchOutcome {
    NoQuery,
    Results { query: String, hits: Vec<ContentHit> },
}

impl SearchOutcome {
    pub fn count(&self) -> usize {
        match self {
            SearchOutcome::NoQuery => 0,
            SearchOutcome::Results { hits, .. } => hits.len(),
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            SearchOutcome::NoQuery => None,
            SearchOutcome::Results { query, .. } => Some(query),
        }
    }

    pub fn hits(&self) -> &[ContentHit] {
        match self {
            SearchOutcome::NoQuery => &[],
            SearchOutcome::Results { hits, .. } => hits,
        }
    }
}

/// A single published record with its body rendered to HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub hit: ContentHit,
    pub body_html: String,
}

impl From<ContentRecord> for ContentDetail {
    fn from(record: ContentRecord) -> Self {
        let body_html = crate::rendering::markdown::render_markdown(&record.body);
        Self {
            hit: record.into(),
            body_html,
        }
    }
}

/// What the home slider needs to render and rotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderPayload {
    pub interval_secs: u64,
    pub slides: Vec<ContentHit>,
}

/// Header autocomplete: news and blog matches, capped at `limit`.
///
/// A blank query returns nothing without touching the store.
pub async fn suggest(aggregator: &Aggregator<'_>, query: &str, limit: usize) -> Vec<ContentHit> {
    if normalize_query(query).is_none() {
        return Vec::new();
    }
    let records = aggregator
        .aggregate(SEARCH_SCOPE, AggregateOptions::default())
        .await;
    filter_records(records, query)
        .into_iter()
        .take(limit)
        .map(ContentHit::from)
        .collect()
}

/// Search page: every news and blog match, newest first.
pub async fn search(aggregator: &Aggregator<'_>, query: &str) -> SearchOutcome {
    let Some(normalized) = normalize_query(query) else {
        return SearchOutcome::NoQuery;
    };
    let records = aggregator
        .aggregate(SEARCH_SCOPE, AggregateOptions::default())
        .await;
    let hits = filter_records(records, &normalized)
        .into_iter()
        .map(ContentHit::from)
        .collect();
    SearchOutcome::Results {
        query: query.trim().to_string(),
        hits,
    }
}

/// Featured events, news and projects for the home slider.
pub async fn slider_records(aggregator: &Aggregator<'_>) -> Vec<ContentRecord> {
    aggregator
        .aggregate(SLIDER_SCOPE, AggregateOptions { featured_only: true })
        .await
}

/// A published report, study or policy paper with its download details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationEntry {
    #[serde(flatten)]
    pub hit: ContentHit,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: String,
    pub pages: Option<u32>,
    pub download_url: Option<String>,
}

/// Publications page: newest year first, optionally restricted to one type
/// ("Rapor", "Araştırma", "Politika Belgesi").
pub async fn publications(store: &dyn ContentStore, kind: Option<&str>) -> Vec<PublicationEntry> {
    let kind = kind.map(str::trim).filter(|k| !k.is_empty()).map(str::to_lowercase);
    let records = CollectionFetcher::new(store)
        .fetch(ContentType::Publication, PublishedFilter::default())
        .await;

    let mut entries: Vec<PublicationEntry> = records
        .iter()
        .filter_map(|record| {
            let RawRecord::Publication(item) = record else {
                return None;
            };
            let normalized = match record.normalize() {
                Ok(normalized) => normalized,
                Err(e) => {
                    tracing::debug!(error = %e, "Dropping malformed publication");
                    return None;
                }
            };
            if !normalized.is_public() {
                return None;
            }
            if kind.as_ref().is_some_and(|k| item.kind.trim().to_lowercase() != *k) {
                return None;
            }
            Some(PublicationEntry {
                hit: normalized.into(),
                kind: item.kind.clone(),
                year: item.year.trim().to_string(),
                pages: item.pages,
                download_url: item.download_url.clone().filter(|url| !url.trim().is_empty()),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.hit.record.published_at.cmp(&a.hit.record.published_at));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fetcher::MockContentStore;
    use crate::error::AppError;
    use async_trait::async_trait;

    struct SampleStore;

    fn raw(content_type: ContentType, fields: serde_json::Value) -> RawRecord {
        let serde_json::Value::Object(fields) = fields else {
            panic!("fields must be an object");
        };
        RawRecord::from_fields(content_type, fields).unwrap()
    }

    #[async_trait]
    impl ContentStore for SampleStore {
        async fn fetch_published(
            &self,
            content_type: ContentType,
            filter: PublishedFilter,
        ) -> Result<Vec<RawRecord>, AppError> {
            let records = match content_type {
                ContentType::News => vec![
                    raw(
                        ContentType::News,
                        serde_json::json!({
                            "id": "1",
                            "title": "Spor Ekonomisi Raporu",
                            "author": "SPOLDER Araştırma Ekibi",
                            "date": "12 Aralık 2024",
                            "status": "published",
                            "featured": true
                        }),
                    ),
                    raw(
                        ContentType::News,
                        serde_json::json!({
                            "id": "2",
                            "title": "Forum",
                            "excerpt": "Belediye temsilcileri bir araya geldi",
                            "date": "8 Aralık 2024",
                            "status": "published"
                        }),
                    ),
                ],
                ContentType::Blog => vec![raw(
                    ContentType::Blog,
                    serde_json::json!({
                        "id": "blog-1",
                        "title": "Kadın Sporculara Destek",
                        "author": "Prof. Elif Kaya",
                        "date": "2024-11-25",
                        "status": "published"
                    }),
                )],
                ContentType::Event => vec![raw(
                    ContentType::Event,
                    serde_json::json!({
                        "id": "e1",
                        "title": "Spor Politikaları Çalıştayı",
                        "date": "2024-12-20",
                        "status": "published",
                        "featured": true
                    }),
                )],
                ContentType::Project => vec![],
                ContentType::Publication => vec![
                    raw(
                        ContentType::Publication,
                        serde_json::json!({
                            "id": "y3",
                            "title": "Yerel Yönetimler ve Spor Tesisleri",
                            "type": "Politika Belgesi",
                            "year": "2023",
                            "pages": 45,
                            "status": "published"
                        }),
                    ),
                    raw(
                        ContentType::Publication,
                        serde_json::json!({
                            "id": "y1",
                            "title": "Türkiye'de Spor Politikalarının Tarihsel Gelişimi",
                            "type": "Rapor",
                            "year": "2024",
                            "pages": 156,
                            "downloadUrl": "/files/tarihsel-gelisim.pdf",
                            "status": "published"
                        }),
                    ),
                    raw(
                        ContentType::Publication,
                        serde_json::json!({
                            "id": "y9",
                            "title": "Taslak Rapor",
                            "type": "Rapor",
                            "year": "2025",
                            "status": "draft"
                        }),
                    ),
                ],
            };
            Ok(records
                .into_iter()
                .filter(|r| !filter.featured_only || r.featured())
                .collect())
        }
    }

    #[tokio::test]
    async fn test_search_blank_query_is_no_query() {
        let store = SampleStore;
        let aggregator = Aggregator::new(&store);
        let outcome = search(&aggregator, "   ").await;
        assert_eq!(outcome, SearchOutcome::NoQuery);
        assert_eq!(outcome.count(), 0);
        assert_eq!(outcome.query(), None);
    }

    #[tokio::test]
    async fn test_search_zero_matches_is_distinct_from_no_query() {
        let store = SampleStore;
        let aggregator = Aggregator::new(&store);
        let outcome = search(&aggregator, "futbol").await;
        assert_eq!(outcome.query(), Some("futbol"));
        assert_eq!(outcome.count(), 0);
        assert_ne!(outcome, SearchOutcome::NoQuery);
    }

    #[tokio::test]
    async fn test_search_spans_news_and_blog() {
        let store = SampleStore;
        let aggregator = Aggregator::new(&store);
        let outcome = search(&aggregator, "spor").await;
        let links: Vec<&str> = outcome.hits().iter().map(|h| h.link.as_str()).collect();
        // Event "Spor Politikaları Çalıştayı" is outside the search scope.
        assert_eq!(links, vec!["/haber/1", "/blog/blog-1"]);
        assert_eq!(outcome.hits()[1].label, "Blog");
    }

    #[tokio::test]
    async fn test_suggest_caps_results() {
        let store = SampleStore;
        let aggregator = Aggregator::new(&store);
        let hits = suggest(&aggregator, "a", 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.id, "1");
    }

    #[tokio::test]
    async fn test_suggest_blank_query_skips_store() {
        let mut store = MockContentStore::new();
        store.expect_fetch_published().never();
        let aggregator = Aggregator::new(&store);
        assert!(suggest(&aggregator, "", DEFAULT_SUGGESTION_LIMIT).await.is_empty());
    }

    #[tokio::test]
    async fn test_slider_records_are_featured_across_scope() {
        let store = SampleStore;
        let aggregator = Aggregator::new(&store);
        let records = slider_records(&aggregator).await;
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "1"]);
        assert!(records.iter().all(ContentRecord::is_slider_eligible));
    }

    #[test]
    fn test_hit_serializes_flat_with_link() {
        let record = raw(
            ContentType::Blog,
            serde_json::json!({
                "id": "blog-2",
                "title": "Dijital Dönüşüm",
                "date": "2024-11-20",
                "status": "published"
            }),
        )
        .normalize()
        .unwrap();

        let json = serde_json::to_value(ContentHit::from(record)).unwrap();
        assert_eq!(json["id"], "blog-2");
        assert_eq!(json["content_type"], "blog");
        assert_eq!(json["link"], "/blog/blog-2");
        assert_eq!(json["label"], "Blog");
    }

    #[tokio::test]
    async fn test_publications_newest_year_first_without_drafts() {
        let store = SampleStore;
        let entries = publications(&store, None).await;
        let ids: Vec<&str> = entries.iter().map(|e| e.hit.record.id.as_str()).collect();
        assert_eq!(ids, vec!["y1", "y3"]);
        assert_eq!(entries[0].pages, Some(156));
        assert_eq!(entries[0].download_url.as_deref(), Some("/files/tarihsel-gelisim.pdf"));
        assert_eq!(entries[0].hit.link, "/yayin/y1");
    }

    #[tokio::test]
    async fn test_publications_by_type() {
        let store = SampleStore;
        let entries = publications(&store, Some("politika belgesi")).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, "Politika Belgesi");
        assert_eq!(publications(&store, Some("  ")).await.len(), 2);
        assert!(publications(&store, Some("Kitap")).await.is_empty());
    }

    #[test]
    fn test_search_outcome_tagging() {
        let json = serde_json::to_value(SearchOutcome::NoQuery).unwrap();
        assert_eq!(json["state"], "no_query");
    }
}
