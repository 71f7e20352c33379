use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::content::aggregator::{AggregateOptions, Aggregator};
use crate::content::fetcher::ContentStore;
use crate::content::filter::filter_records;
use crate::content::presenter::{
    self, ContentDetail, ContentHit, PublicationEntry, SearchOutcome, SliderPayload,
};
use crate::content::record::ContentType;
use crate::db::models::BoardMember;
use crate::db::settings_repository::SiteSettings;
use crate::error::AppError;
use crate::state::AppState;

/// Upper bound for `?limit=` on suggestions.
pub const MAX_SUGGESTION_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublicationQuery {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Search response body. `query` is `null` when no query was given, which
/// is not the same as a query with zero hits.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: Option<String>,
    pub count: usize,
    pub hits: Vec<ContentHit>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::NoQuery => Self {
                query: None,
                count: 0,
                hits: Vec::new(),
            },
            SearchOutcome::Results { query, hits } => Self {
                query: Some(query),
                count: hits.len(),
                hits,
            },
        }
    }
}

/// Resolve a `{content_type}` path segment (`news`, `events`, ...).
pub fn parse_content_type(segment: &str) -> Result<ContentType, AppError> {
    ContentType::from_collection(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown content type '{}'", segment)))
}

/// Core slider logic, separated from the Axum handler for testability.
pub async fn process_slider(store: &dyn ContentStore, interval_secs: u64) -> SliderPayload {
    let aggregator = Aggregator::new(store);
    let slides = presenter::slider_records(&aggregator)
        .await
        .into_iter()
        .map(ContentHit::from)
        .collect();
    SliderPayload {
        interval_secs,
        slides,
    }
}

/// A single published record, or `NotFound`.
pub async fn process_detail(
    store: &dyn ContentStore,
    content_type: ContentType,
    id: &str,
) -> Result<ContentDetail, AppError> {
    Aggregator::new(store)
        .aggregate(&[content_type], AggregateOptions::default())
        .await
        .into_iter()
        .find(|record| record.id == id)
        .map(ContentDetail::from)
        .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", content_type, id)))
}

/// Published records of one collection, optionally filtered by `query`.
pub async fn process_collection(
    store: &dyn ContentStore,
    content_type: ContentType,
    query: Option<&str>,
) -> Vec<ContentHit> {
    let records = Aggregator::new(store)
        .aggregate(&[content_type], AggregateOptions::default())
        .await;
    let records = match query {
        Some(q) if !q.trim().is_empty() => filter_records(records, q),
        _ => records,
    };
    records.into_iter().map(ContentHit::from).collect()
}

/// `GET /api/v1/slider`
pub async fn slider_handler(State(state): State<AppState>) -> Json<SliderPayload> {
    Json(
        process_slider(
            state.content_store.as_ref(),
            state.presentation.slide_interval_secs,
        )
        .await,
    )
}

/// `GET /api/v1/search?q=`
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let aggregator = Aggregator::new(state.content_store.as_ref());
    let outcome = presenter::search(&aggregator, params.q.as_deref().unwrap_or_default()).await;
    Json(outcome.into())
}

/// `GET /api/v1/suggest?q=&limit=`
pub async fn suggest_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<ContentHit>> {
    let limit = params
        .limit
        .unwrap_or(state.presentation.suggestion_limit)
        .min(MAX_SUGGESTION_LIMIT);
    let aggregator = Aggregator::new(state.content_store.as_ref());
    Json(presenter::suggest(&aggregator, params.q.as_deref().unwrap_or_default(), limit).await)
}

/// `GET /api/v1/content/{content_type}/{id}`
pub async fn detail_handler(
    State(state): State<AppState>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<ContentDetail>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    process_detail(state.content_store.as_ref(), content_type, &id)
        .await
        .map(Json)
}

/// `GET /api/v1/content/{content_type}?q=`
pub async fn collection_handler(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ContentHit>>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    Ok(Json(
        process_collection(state.content_store.as_ref(), content_type, params.q.as_deref()).await,
    ))
}

/// `GET /api/v1/publications?type=`
pub async fn publications_handler(
    State(state): State<AppState>,
    Query(params): Query<PublicationQuery>,
) -> Json<Vec<PublicationEntry>> {
    Json(presenter::publications(state.content_store.as_ref(), params.kind.as_deref()).await)
}

/// `GET /api/v1/board`: board members in display order.
pub async fn board_handler(State(state): State<AppState>) -> Result<Json<Vec<BoardMember>>, AppError> {
    state.board_repo.list().await.map(Json)
}

/// `GET /api/v1/settings/public`: bank and contact details.
pub async fn public_settings_handler(
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>, AppError> {
    state.settings_repo.get_settings().await.map(Json)
}
