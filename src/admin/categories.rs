use chrono::Utc;
use serde::Deserialize;

use crate::db::models::{Category, CategoryScope};
use crate::error::AppError;

pub const CATEGORY_NAME_MAX: usize = 50;
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

/// Category form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(alias = "type")]
    pub scope: CategoryScope,
    #[serde(default)]
    pub color: Option<String>,
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl CategoryInput {
    /// Validate the form and build the category to store.
    ///
    /// A missing id means a new category and gets a fresh one.
    pub fn into_category(self) -> Result<Category, AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Category name is required".into()));
        }
        if name.chars().count() > CATEGORY_NAME_MAX {
            return Err(AppError::BadRequest(format!(
                "Category name is limited to {} characters",
                CATEGORY_NAME_MAX
            )));
        }

        let color = match self.color.map(|c| c.trim().to_string()) {
            None => DEFAULT_CATEGORY_COLOR.to_string(),
            Some(c) if c.is_empty() => DEFAULT_CATEGORY_COLOR.to_string(),
            Some(c) if is_hex_color(&c) => c.to_uppercase(),
            Some(c) => {
                return Err(AppError::BadRequest(format!(
                    "Color '{}' must look like #RRGGBB",
                    c
                )))
            }
        };

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(Category {
            id,
            name,
            scope: self.scope,
            color,
            created_at: Utc::now(),
        })
    }
}
