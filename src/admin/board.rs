use chrono::Utc;
use serde_json::{Map, Value};

use crate::admin::crud::apply_changes;
use crate::admin::schema::{board_descriptor, validate, ValidationMode, BOARD_COLLECTION};
use crate::db::activity_repository::ActivityRepository;
use crate::db::board_repository::BoardRepository;
use crate::db::models::{ActivityAction, ActivityEntry, BoardMember};
use crate::error::AppError;

/// Members written on first start when the board is empty.
const DEFAULT_MEMBERS: &[(&str, &str, &str, &str)] = &[
    (
        "Prof. Dr. Ahmet Yılmaz",
        "Başkan",
        "Spor yönetimi alanında 20 yıllık deneyime sahip.",
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop",
    ),
    (
        "Doç. Dr. Ayşe Demir",
        "Başkan Yardımcısı",
        "Spor politikaları ve toplumsal cinsiyet eşitliği uzmanı.",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=400&fit=crop",
    ),
    (
        "Dr. Mehmet Kaya",
        "Genel Sekreter",
        "Uluslararası spor organizasyonları deneyimi.",
        "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=400&fit=crop",
    ),
];

/// Fill an empty board with the default members. Returns how many were added.
pub async fn seed_default_board(repo: &dyn BoardRepository) -> Result<usize, AppError> {
    if !repo.list().await?.is_empty() {
        return Ok(0);
    }
    for (position, (name, role, bio, image)) in DEFAULT_MEMBERS.iter().enumerate() {
        repo.upsert(BoardMember {
            id: format!("kurul-{}", position + 1),
            name: name.to_string(),
            position: role.to_string(),
            bio: bio.to_string(),
            image: Some(image.to_string()),
            order: position as i64 + 1,
            created_at: Utc::now(),
        })
        .await?;
    }
    tracing::info!(count = DEFAULT_MEMBERS.len(), "Default board members created");
    Ok(DEFAULT_MEMBERS.len())
}

/// Admin operations on the board member list.
pub struct BoardService<'a> {
    board: &'a dyn BoardRepository,
    activity: &'a dyn ActivityRepository,
}

impl<'a> BoardService<'a> {
    pub fn new(board: &'a dyn BoardRepository, activity: &'a dyn ActivityRepository) -> Self {
        Self { board, activity }
    }

    pub async fn list(&self) -> Result<Vec<BoardMember>, AppError> {
        self.board.list().await
    }

    pub async fn get(&self, id: &str) -> Result<BoardMember, AppError> {
        self.board
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Board member '{}' not found", id)))
    }

    pub async fn create(&self, payload: Map<String, Value>) -> Result<BoardMember, AppError> {
        let mut fields = validate(&board_descriptor(), payload, ValidationMode::Create)?;
        fields.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));

        let member = member_from_fields(fields)?;
        self.board.upsert(member.clone()).await?;

        tracing::info!(id = %member.id, name = %member.name, "Board member created");
        self.log(ActivityAction::Create, &member.name).await;
        Ok(member)
    }

    pub async fn update(&self, id: &str, payload: Map<String, Value>) -> Result<BoardMember, AppError> {
        let changes = validate(&board_descriptor(), payload, ValidationMode::Update)?;
        let existing = self.get(id).await?;

        let mut fields = match serde_json::to_value(&existing) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(AppError::Internal(e.to_string())),
        };
        apply_changes(&mut fields, changes);

        let member = member_from_fields(fields)?;
        self.board.upsert(member.clone()).await?;

        tracing::info!(id, "Board member updated");
        self.log(ActivityAction::Update, &member.name).await;
        Ok(member)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        self.board.delete(id).await?;

        tracing::info!(id, "Board member deleted");
        self.log(ActivityAction::Delete, &existing.name).await;
        Ok(())
    }

    async fn log(&self, action: ActivityAction, name: &str) {
        let entry = ActivityEntry {
            id: uuid::Uuid::new_v4().to_string(),
            action,
            entity: BOARD_COLLECTION.to_string(),
            title: name.to_string(),
            at: Utc::now(),
        };
        if let Err(e) = self.activity.record(entry).await {
            tracing::warn!(error = %e, "Failed to record board activity");
        }
    }
}

fn member_from_fields(fields: Map<String, Value>) -> Result<BoardMember, AppError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::BadRequest(format!("Invalid board member: {}", e)))
}
