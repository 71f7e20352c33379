//! Field descriptors driving the admin forms and payload validation.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::content::record::ContentType;
use crate::error::AppError;

pub const META_TITLE_MAX: usize = 60;
pub const META_DESCRIPTION_MAX: usize = 160;

const STATUS_CHOICES: &[&str] = &["draft", "published"];
const PUBLICATION_KINDS: &[&str] = &["Rapor", "Araştırma", "Politika Belgesi"];

/// Shape of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
    /// `YYYY`
    Year,
    Bool,
    Number,
    Integer,
    /// Absolute URL or site-relative path.
    Url,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
        max_len: None,
    }
}

const fn required(spec: FieldSpec) -> FieldSpec {
    FieldSpec {
        required: true,
        ..spec
    }
}

const fn limited(spec: FieldSpec, max_len: usize) -> FieldSpec {
    FieldSpec {
        max_len: Some(max_len),
        ..spec
    }
}

/// The editable fields of one admin collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaDescriptor {
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
}

impl SchemaDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const NEWS_FIELDS: &[FieldSpec] = &[
    required(limited(field("title", "Başlık", FieldKind::Text), 200)),
    limited(field("excerpt", "Özet", FieldKind::LongText), 500),
    field("content", "İçerik", FieldKind::LongText),
    field("image", "Görsel", FieldKind::Url),
    field("category", "Kategori", FieldKind::Text),
    field("author", "Yazar", FieldKind::Text),
    required(field("date", "Tarih", FieldKind::Date)),
    field("slug", "URL", FieldKind::Text),
    limited(field("meta_title", "Meta Başlık", FieldKind::Text), META_TITLE_MAX),
    limited(field("meta_description", "Meta Açıklama", FieldKind::LongText), META_DESCRIPTION_MAX),
    field("status", "Yayın Durumu", FieldKind::Choice(STATUS_CHOICES)),
    field("featured", "Slider'da Göster", FieldKind::Bool),
];

const EVENT_FIELDS: &[FieldSpec] = &[
    required(limited(field("title", "Başlık", FieldKind::Text), 200)),
    limited(field("summary", "Özet", FieldKind::LongText), 500),
    field("content", "İçerik", FieldKind::LongText),
    required(field("date", "Tarih", FieldKind::Date)),
    field("time", "Saat", FieldKind::Time),
    field("location", "Konum", FieldKind::Text),
    field("latitude", "Enlem", FieldKind::Number),
    field("longitude", "Boylam", FieldKind::Number),
    field("image", "Görsel", FieldKind::Url),
    field("category", "Kategori", FieldKind::Text),
    field("capacity", "Kapasite", FieldKind::Integer),
    field("registered", "Kayıtlı", FieldKind::Integer),
    field("state", "Durum", FieldKind::Text),
    field("slug", "URL", FieldKind::Text),
    limited(field("meta_title", "Meta Başlık", FieldKind::Text), META_TITLE_MAX),
    limited(field("meta_description", "Meta Açıklama", FieldKind::LongText), META_DESCRIPTION_MAX),
    field("status", "Yayın Durumu", FieldKind::Choice(STATUS_CHOICES)),
    field("featured", "Slider'da Göster", FieldKind::Bool),
];

const PROJECT_FIELDS: &[FieldSpec] = &[
    required(limited(field("title", "Başlık", FieldKind::Text), 200)),
    limited(field("description", "Açıklama", FieldKind::LongText), 500),
    field("content", "İçerik", FieldKind::LongText),
    field("image", "Görsel", FieldKind::Url),
    field("category", "Kategori", FieldKind::Text),
    field("project_state", "Proje Durumu", FieldKind::Text),
    required(field("start_date", "Başlangıç", FieldKind::Date)),
    field("end_date", "Bitiş", FieldKind::Date),
    field("slug", "URL", FieldKind::Text),
    limited(field("meta_title", "Meta Başlık", FieldKind::Text), META_TITLE_MAX),
    limited(field("meta_description", "Meta Açıklama", FieldKind::LongText), META_DESCRIPTION_MAX),
    field("status", "Yayın Durumu", FieldKind::Choice(STATUS_CHOICES)),
    field("featured", "Slider'da Göster", FieldKind::Bool),
];

const BLOG_FIELDS: &[FieldSpec] = &[
    required(limited(field("title", "Başlık", FieldKind::Text), 200)),
    limited(field("excerpt", "Özet", FieldKind::LongText), 500),
    field("content", "İçerik", FieldKind::LongText),
    field("image", "Görsel", FieldKind::Url),
    field("author", "Yazar", FieldKind::Text),
    field("category", "Kategori", FieldKind::Text),
    required(field("date", "Tarih", FieldKind::Date)),
    field("slug", "URL", FieldKind::Text),
    limited(field("meta_title", "Meta Başlık", FieldKind::Text), META_TITLE_MAX),
    limited(field("meta_description", "Meta Açıklama", FieldKind::LongText), META_DESCRIPTION_MAX),
    field("status", "Yayın Durumu", FieldKind::Choice(STATUS_CHOICES)),
    field("featured", "Slider'da Göster", FieldKind::Bool),
];

const PUBLICATION_FIELDS: &[FieldSpec] = &[
    required(limited(field("title", "Başlık", FieldKind::Text), 200)),
    required(field("type", "Tür", FieldKind::Choice(PUBLICATION_KINDS))),
    required(field("year", "Yıl", FieldKind::Year)),
    limited(field("description", "Açıklama", FieldKind::LongText), 500),
    field("content", "İçerik", FieldKind::LongText),
    field("author", "Yazar", FieldKind::Text),
    field("pages", "Sayfa Sayısı", FieldKind::Integer),
    field("download_url", "İndirme Bağlantısı", FieldKind::Url),
    field("image", "Kapak Görseli", FieldKind::Url),
    field("slug", "URL", FieldKind::Text),
    limited(field("meta_title", "Meta Başlık", FieldKind::Text), META_TITLE_MAX),
    limited(field("meta_description", "Meta Açıklama", FieldKind::LongText), META_DESCRIPTION_MAX),
    field("status", "Yayın Durumu", FieldKind::Choice(STATUS_CHOICES)),
    field("featured", "Slider'da Göster", FieldKind::Bool),
];

const BOARD_FIELDS: &[FieldSpec] = &[
    required(limited(field("name", "Ad Soyad", FieldKind::Text), 200)),
    required(limited(field("position", "Görev", FieldKind::Text), 100)),
    limited(field("bio", "Biyografi", FieldKind::LongText), 1000),
    field("image", "Fotoğraf", FieldKind::Url),
    field("order", "Sıra", FieldKind::Integer),
];

pub fn descriptor_for(content_type: ContentType) -> SchemaDescriptor {
    let fields = match content_type {
        ContentType::News => NEWS_FIELDS,
        ContentType::Event => EVENT_FIELDS,
        ContentType::Project => PROJECT_FIELDS,
        ContentType::Blog => BLOG_FIELDS,
        ContentType::Publication => PUBLICATION_FIELDS,
    };
    SchemaDescriptor {
        collection: content_type.collection(),
        fields,
    }
}

/// Fields of the board member form.
pub fn board_descriptor() -> SchemaDescriptor {
    SchemaDescriptor {
        collection: BOARD_COLLECTION,
        fields: BOARD_FIELDS,
    }
}

pub const BOARD_COLLECTION: &str = "board";

/// Whether a payload describes a new record or a partial change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// Fields managed by the server; silently dropped from payloads.
const SERVER_FIELDS: &[&str] = &["id", "created_at", "content_type", "_id"];

/// Check a form payload against `schema` and return the accepted fields.
///
/// In [`ValidationMode::Create`] `null` values are treated as absent and
/// every required field must be present and non-blank. In
/// [`ValidationMode::Update`] only the fields sent are checked, and `null`
/// on an optional field is kept so the caller can clear it.
pub fn validate(
    schema: &SchemaDescriptor,
    payload: Map<String, Value>,
    mode: ValidationMode,
) -> Result<Map<String, Value>, AppError> {
    let mut accepted = Map::new();

    for (name, value) in payload {
        if SERVER_FIELDS.contains(&name.as_str()) {
            continue;
        }
        if value.is_null() && mode == ValidationMode::Create {
            continue;
        }
        let spec = schema.field(&name).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unknown field '{}' for {}",
                name, schema.collection
            ))
        })?;
        if value.is_null() {
            if spec.required {
                return Err(AppError::BadRequest(format!(
                    "Field '{}' is required",
                    spec.name
                )));
            }
        } else {
            check_value(spec, &value)?;
        }
        accepted.insert(name, value);
    }

    if mode == ValidationMode::Create {
        for spec in schema.fields.iter().filter(|f| f.required) {
            if !accepted.contains_key(spec.name) {
                return Err(AppError::BadRequest(format!(
                    "Field '{}' is required",
                    spec.name
                )));
            }
        }
    }

    Ok(accepted)
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<(), AppError> {
    let invalid = |expected: &str| {
        AppError::BadRequest(format!("Field '{}' must be {}", spec.name, expected))
    };

    match spec.kind {
        FieldKind::Bool => {
            if !value.is_boolean() {
                return Err(invalid("a boolean"));
            }
        }
        FieldKind::Number => {
            if !value.is_number() {
                return Err(invalid("a number"));
            }
        }
        FieldKind::Integer => {
            if value.as_u64().is_none_or(|n| n > u64::from(u32::MAX)) {
                return Err(invalid("a non-negative integer"));
            }
        }
        FieldKind::Text
        | FieldKind::LongText
        | FieldKind::Date
        | FieldKind::Time
        | FieldKind::Year
        | FieldKind::Url
        | FieldKind::Choice(_) => {
            let text = value.as_str().ok_or_else(|| invalid("a string"))?;
            check_text(spec, text)?;
        }
    }
    Ok(())
}

fn check_text(spec: &FieldSpec, text: &str) -> Result<(), AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return if spec.required {
            Err(AppError::BadRequest(format!(
                "Field '{}' is required",
                spec.name
            )))
        } else {
            Ok(())
        };
    }

    if let Some(max) = spec.max_len {
        let len = text.chars().count();
        if len > max {
            return Err(AppError::BadRequest(format!(
                "Field '{}' is {} characters long, the limit is {}",
                spec.name, len, max
            )));
        }
    }

    let valid = match spec.kind {
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok(),
        FieldKind::Time => NaiveTime::parse_from_str(trimmed, "%H:%M").is_ok(),
        FieldKind::Year => trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()),
        FieldKind::Url => trimmed.starts_with('/') || url::Url::parse(trimmed).is_ok(),
        FieldKind::Choice(options) => options.contains(&text),
        _ => true,
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Field '{}' has an invalid value '{}'",
            spec.name, text
        )))
    }
}
