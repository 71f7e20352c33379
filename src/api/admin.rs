use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::admin::board::BoardService;
use crate::admin::categories::CategoryInput;
use crate::admin::crud::{CrudService, Dashboard};
use crate::admin::schema::{board_descriptor, descriptor_for, SchemaDescriptor, BOARD_COLLECTION};
use crate::api::content::parse_content_type;
use crate::auth::models::AdminSession;
use crate::db::models::{BoardMember, Category, CategoryScope, RawRecord};
use crate::db::settings_repository::SiteSettings;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    #[serde(default, alias = "type")]
    pub scope: Option<CategoryScope>,
}

fn crud(state: &AppState) -> CrudService<'_> {
    CrudService::new(state.content_repo.as_ref(), state.activity_repo.as_ref())
}

fn board(state: &AppState) -> BoardService<'_> {
    BoardService::new(state.board_repo.as_ref(), state.activity_repo.as_ref())
}

/// `GET /api/v1/admin/{content_type}`: every record, drafts included.
pub async fn list_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> Result<Json<Vec<RawRecord>>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    crud(&state).list(content_type).await.map(Json)
}

/// `POST /api/v1/admin/{content_type}`
pub async fn create_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(content_type): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<RawRecord>), AppError> {
    let content_type = parse_content_type(&content_type)?;
    let record = crud(&state).create(content_type, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/v1/admin/{content_type}/{id}`
pub async fn get_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<RawRecord>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    crud(&state).get(content_type, &id).await.map(Json)
}

/// `PUT /api/v1/admin/{content_type}/{id}`: partial update.
pub async fn update_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((content_type, id)): Path<(String, String)>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<RawRecord>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    crud(&state).update(content_type, &id, payload).await.map(Json)
}

/// `DELETE /api/v1/admin/{content_type}/{id}`
pub async fn delete_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let content_type = parse_content_type(&content_type)?;
    crud(&state).delete(content_type, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/admin/{content_type}/bulk-delete`
pub async fn bulk_delete_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(content_type): Path<String>,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    let deleted = crud(&state).bulk_delete(content_type, &req.ids).await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}

/// `POST /api/v1/admin/{content_type}/{id}/toggle-publish`
pub async fn toggle_publish_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<RawRecord>, AppError> {
    let content_type = parse_content_type(&content_type)?;
    crud(&state).toggle_publish(content_type, &id).await.map(Json)
}

/// `GET /api/v1/admin/schema/{collection}`: form descriptor.
pub async fn schema_handler(
    _session: AdminSession,
    Path(collection): Path<String>,
) -> Result<Json<SchemaDescriptor>, AppError> {
    if collection == BOARD_COLLECTION {
        return Ok(Json(board_descriptor()));
    }
    let content_type = parse_content_type(&collection)?;
    Ok(Json(descriptor_for(content_type)))
}

/// `GET /api/v1/admin/board`
pub async fn list_board_handler(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardMember>>, AppError> {
    board(&state).list().await.map(Json)
}

/// `POST /api/v1/admin/board`
pub async fn create_board_member_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<BoardMember>), AppError> {
    let member = board(&state).create(payload).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// `GET /api/v1/admin/board/{id}`
pub async fn get_board_member_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BoardMember>, AppError> {
    board(&state).get(&id).await.map(Json)
}

/// `PUT /api/v1/admin/board/{id}`: partial update.
pub async fn update_board_member_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<BoardMember>, AppError> {
    board(&state).update(&id, payload).await.map(Json)
}

/// `DELETE /api/v1/admin/board/{id}`
pub async fn delete_board_member_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    board(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/admin/dashboard`
pub async fn dashboard_handler(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Dashboard>, AppError> {
    crud(&state).dashboard().await.map(Json)
}

/// `GET /api/v1/admin/categories?scope=`
pub async fn list_categories_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<Category>>, AppError> {
    state.category_repo.list(filter.scope).await.map(Json)
}

/// `POST /api/v1/admin/categories`: create or replace.
pub async fn save_category_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = input.into_category()?;
    state.category_repo.upsert(category.clone()).await?;
    tracing::info!(id = %category.id, name = %category.name, "Category saved");
    Ok((StatusCode::CREATED, Json(category)))
}

/// `DELETE /api/v1/admin/categories/{id}`
pub async fn delete_category_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.category_repo.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Category '{}' not found", id)))
    }
}

/// `GET /api/v1/admin/settings`
pub async fn get_settings_handler(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>, AppError> {
    state.settings_repo.get_settings().await.map(Json)
}

/// `PUT /api/v1/admin/settings`
pub async fn save_settings_handler(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<SiteSettings>, AppError> {
    settings.validate()?;
    state.settings_repo.save_settings(settings.clone()).await?;
    tracing::info!("Site settings updated");
    Ok(Json(settings))
}
