use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::models::RawRecord;
use crate::rendering::markdown::strip_markdown_for_preview;

/// Length of an excerpt derived from the body when none was entered.
pub const DERIVED_EXCERPT_LEN: usize = 200;

/// The kind of content a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    News,
    Event,
    Project,
    Blog,
    Publication,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::News,
        ContentType::Event,
        ContentType::Project,
        ContentType::Blog,
        ContentType::Publication,
    ];

    /// Name of the backing collection.
    pub fn collection(&self) -> &'static str {
        match self {
            ContentType::News => "news",
            ContentType::Event => "events",
            ContentType::Project => "projects",
            ContentType::Blog => "blog",
            ContentType::Publication => "publications",
        }
    }

    /// Prefix of the public detail route.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            ContentType::News => "/haber",
            ContentType::Event => "/etkinlik",
            ContentType::Project => "/proje",
            ContentType::Blog => "/blog",
            ContentType::Publication => "/yayin",
        }
    }

    /// Path of the public listing page.
    pub fn listing_path(&self) -> &'static str {
        match self {
            ContentType::News => "/haberler",
            ContentType::Event => "/etkinlikler",
            ContentType::Project => "/projeler",
            ContentType::Blog => "/blog",
            ContentType::Publication => "/yayinlar",
        }
    }

    /// Turkish display label.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::News => "Haber",
            ContentType::Event => "Etkinlik",
            ContentType::Project => "Proje",
            ContentType::Blog => "Blog",
            ContentType::Publication => "Yayın",
        }
    }

    /// Parse a collection name (`news`, `events`, ...) or a singular tag (`event`).
    pub fn from_collection(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "news" => Some(ContentType::News),
            "events" | "event" => Some(ContentType::Event),
            "projects" | "project" => Some(ContentType::Project),
            "blog" => Some(ContentType::Blog),
            "publications" | "publication" => Some(ContentType::Publication),
            _ => None,
        }
    }

    /// Public path of the record with the given id.
    pub fn link_for(&self, id: &str) -> String {
        format!("{}/{}", self.route_prefix(), id)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Draft/published gate for public visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    #[serde(alias = "taslak")]
    Draft,
    #[serde(alias = "yayinlandi")]
    Published,
}

impl PublicationStatus {
    /// Stored spelling, as used in store filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Published => "published",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PublicationStatus::Draft => PublicationStatus::Published,
            PublicationStatus::Published => PublicationStatus::Draft,
        }
    }
}

/// The common, presentation-only shape every collection is coerced into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub content_type: ContentType,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub author: String,
    pub published_at: NaiveDate,
    pub category: String,
    pub image: Option<String>,
    pub featured: bool,
    pub status: PublicationStatus,
}

impl ContentRecord {
    /// Navigation target, derived from `(content_type, id)`.
    pub fn link(&self) -> String {
        self.content_type.link_for(&self.id)
    }

    pub fn is_public(&self) -> bool {
        self.status == PublicationStatus::Published
    }

    pub fn is_slider_eligible(&self) -> bool {
        self.featured && self.is_public()
    }
}

/// Why a raw record could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("record has no id")]
    MissingId,

    #[error("record '{0}' has no title")]
    MissingTitle(String),

    #[error("record '{id}' has an unreadable date '{value}'")]
    InvalidDate { id: String, value: String },
}

impl RawRecord {
    /// Coerce the record into a [`ContentRecord`].
    pub fn normalize(&self) -> Result<ContentRecord, NormalizeError> {
        let (title, excerpt, body, author, date, category, image) = match self {
            RawRecord::News(item) => (
                &item.title,
                &item.excerpt,
                &item.content,
                item.author.as_str(),
                &item.date,
                &item.category,
                &item.image,
            ),
            RawRecord::Event(item) => (
                &item.title,
                &item.summary,
                &item.content,
                "",
                &item.date,
                &item.category,
                &item.image,
            ),
            RawRecord::Project(item) => (
                &item.title,
                &item.description,
                &item.content,
                "",
                &item.start_date,
                &item.category,
                &item.image,
            ),
            RawRecord::Blog(item) => (
                &item.title,
                &item.excerpt,
                &item.content,
                item.author.as_str(),
                &item.date,
                &item.category,
                &item.image,
            ),
            RawRecord::Publication(item) => (
                &item.title,
                &item.description,
                &item.content,
                item.author.as_str(),
                &item.year,
                &item.kind,
                &item.image,
            ),
        };

        let id = self.id().trim();
        if id.is_empty() {
            return Err(NormalizeError::MissingId);
        }
        if title.trim().is_empty() {
            return Err(NormalizeError::MissingTitle(id.to_string()));
        }
        let published_at = parse_display_date(date).ok_or_else(|| NormalizeError::InvalidDate {
            id: id.to_string(),
            value: date.clone(),
        })?;

        let excerpt = if excerpt.trim().is_empty() {
            strip_markdown_for_preview(body, DERIVED_EXCERPT_LEN)
        } else {
            excerpt.trim().to_string()
        };

        Ok(ContentRecord {
            id: id.to_string(),
            content_type: self.content_type(),
            title: title.trim().to_string(),
            excerpt,
            body: body.clone(),
            author: author.trim().to_string(),
            published_at,
            category: category.clone(),
            image: image.clone().filter(|url| !url.trim().is_empty()),
            featured: self.featured(),
            status: self.status(),
        })
    }
}

const TURKISH_MONTHS: [(&str, &str, u32); 12] = [
    ("ocak", "ocak", 1),
    ("şubat", "subat", 2),
    ("mart", "mart", 3),
    ("nisan", "nisan", 4),
    ("mayıs", "mayis", 5),
    ("haziran", "haziran", 6),
    ("temmuz", "temmuz", 7),
    ("ağustos", "agustos", 8),
    ("eylül", "eylul", 9),
    ("ekim", "ekim", 10),
    ("kasım", "kasim", 11),
    ("aralık", "aralik", 12),
];

/// Parse a date as stored by the admin panel.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, the Turkish long form
/// (`12 Aralık 2024`) and a bare year, read as 1 January.
pub fn parse_display_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    let mut parts = raw.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let month = month.to_lowercase();
    let month = TURKISH_MONTHS
        .iter()
        .find(|(name, ascii, _)| month == *name || month == *ascii)
        .map(|(_, _, number)| *number)?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}
