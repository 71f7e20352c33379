use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::record::{ContentType, PublicationStatus};

/// A news article stored in the `news` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    /// Display date as entered in the admin panel.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "metaTitle")]
    pub meta_title: String,
    #[serde(default, alias = "metaDescription")]
    pub meta_description: String,
    #[serde(default, alias = "publishStatus")]
    pub status: PublicationStatus,
    #[serde(default, alias = "showInSlider")]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// An event stored in the `events` collection.
///
/// Older event documents were written with Turkish field names; those are
/// accepted as aliases on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "baslik")]
    pub title: String,
    #[serde(default, alias = "ozet")]
    pub summary: String,
    #[serde(default, alias = "icerik")]
    pub content: String,
    #[serde(default, alias = "tarih")]
    pub date: String,
    /// Start time, `HH:MM`.
    #[serde(default, alias = "saat")]
    pub time: String,
    #[serde(default, alias = "konum")]
    pub location: String,
    #[serde(default, alias = "konum_lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "konum_lng")]
    pub longitude: Option<f64>,
    #[serde(default, alias = "gorsel")]
    pub image: Option<String>,
    #[serde(default, alias = "kategori")]
    pub category: String,
    #[serde(default, alias = "kapasite")]
    pub capacity: Option<u32>,
    #[serde(default, alias = "kayitli")]
    pub registered: Option<u32>,
    /// Free-text lifecycle label such as "Açık" or "Devam Ediyor".
    #[serde(default, alias = "durum")]
    pub state: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "meta_baslik")]
    pub meta_title: String,
    #[serde(default, alias = "meta_aciklama")]
    pub meta_description: String,
    #[serde(default, alias = "yayin_durumu")]
    pub status: PublicationStatus,
    #[serde(default, alias = "sliderda_goster")]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A project stored in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Progress label ("Devam Ediyor", "Tamamlandı", ...).
    #[serde(default)]
    pub project_state: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "metaTitle")]
    pub meta_title: String,
    #[serde(default, alias = "metaDescription")]
    pub meta_description: String,
    #[serde(default, alias = "publishStatus")]
    pub status: PublicationStatus,
    #[serde(default, alias = "showInSlider")]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A blog post stored in the `blog` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "metaTitle")]
    pub meta_title: String,
    #[serde(default, alias = "metaDescription")]
    pub meta_description: String,
    #[serde(default, alias = "publishStatus")]
    pub status: PublicationStatus,
    #[serde(default, alias = "showInSlider")]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A report, study or policy paper stored in the `publications` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// "Rapor", "Araştırma" or "Politika Belgesi".
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Publication year, `YYYY`.
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default, alias = "downloadUrl")]
    pub download_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "metaTitle")]
    pub meta_title: String,
    #[serde(default, alias = "metaDescription")]
    pub meta_description: String,
    #[serde(default, alias = "publishStatus")]
    pub status: PublicationStatus,
    #[serde(default, alias = "showInSlider")]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A record as persisted, tagged with the collection it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "lowercase")]
pub enum RawRecord {
    News(NewsItem),
    Event(EventItem),
    Project(ProjectItem),
    Blog(BlogPost),
    Publication(PublicationItem),
}

impl RawRecord {
    pub fn content_type(&self) -> ContentType {
        match self {
            RawRecord::News(_) => ContentType::News,
            RawRecord::Event(_) => ContentType::Event,
            RawRecord::Project(_) => ContentType::Project,
            RawRecord::Blog(_) => ContentType::Blog,
            RawRecord::Publication(_) => ContentType::Publication,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            RawRecord::News(item) => &item.id,
            RawRecord::Event(item) => &item.id,
            RawRecord::Project(item) => &item.id,
            RawRecord::Blog(item) => &item.id,
            RawRecord::Publication(item) => &item.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            RawRecord::News(item) => &item.title,
            RawRecord::Event(item) => &item.title,
            RawRecord::Project(item) => &item.title,
            RawRecord::Blog(item) => &item.title,
            RawRecord::Publication(item) => &item.title,
        }
    }

    pub fn status(&self) -> PublicationStatus {
        match self {
            RawRecord::News(item) => item.status,
            RawRecord::Event(item) => item.status,
            RawRecord::Project(item) => item.status,
            RawRecord::Blog(item) => item.status,
            RawRecord::Publication(item) => item.status,
        }
    }

    pub fn set_status(&mut self, status: PublicationStatus) {
        match self {
            RawRecord::News(item) => item.status = status,
            RawRecord::Event(item) => item.status = status,
            RawRecord::Project(item) => item.status = status,
            RawRecord::Blog(item) => item.status = status,
            RawRecord::Publication(item) => item.status = status,
        }
    }

    pub fn featured(&self) -> bool {
        match self {
            RawRecord::News(item) => item.featured,
            RawRecord::Event(item) => item.featured,
            RawRecord::Project(item) => item.featured,
            RawRecord::Blog(item) => item.featured,
            RawRecord::Publication(item) => item.featured,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            RawRecord::News(item) => item.created_at,
            RawRecord::Event(item) => item.created_at,
            RawRecord::Project(item) => item.created_at,
            RawRecord::Blog(item) => item.created_at,
            RawRecord::Publication(item) => item.created_at,
        }
    }

    /// Build a record of the given type from a flat field map.
    pub fn from_fields(
        content_type: ContentType,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        let value = serde_json::Value::Object(fields);
        Ok(match content_type {
            ContentType::News => RawRecord::News(serde_json::from_value(value)?),
            ContentType::Event => RawRecord::Event(serde_json::from_value(value)?),
            ContentType::Project => RawRecord::Project(serde_json::from_value(value)?),
            ContentType::Blog => RawRecord::Blog(serde_json::from_value(value)?),
            ContentType::Publication => RawRecord::Publication(serde_json::from_value(value)?),
        })
    }

    /// Flatten the record into its field map (without the type tag).
    pub fn to_fields(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        let value = match self {
            RawRecord::News(item) => serde_json::to_value(item)?,
            RawRecord::Event(item) => serde_json::to_value(item)?,
            RawRecord::Project(item) => serde_json::to_value(item)?,
            RawRecord::Blog(item) => serde_json::to_value(item)?,
            RawRecord::Publication(item) => serde_json::to_value(item)?,
        };
        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        }
    }

    /// Decode a raw MongoDB document belonging to `content_type`'s collection.
    ///
    /// Legacy keys are folded into their current names first; when both
    /// spellings are present the current one wins.
    #[cfg(feature = "ssr")]
    pub fn from_document(
        content_type: ContentType,
        mut document: bson::Document,
    ) -> Result<Self, bson::de::Error> {
        canonicalize_document(content_type, &mut document);
        Ok(match content_type {
            ContentType::News => RawRecord::News(bson::from_document(document)?),
            ContentType::Event => RawRecord::Event(bson::from_document(document)?),
            ContentType::Project => RawRecord::Project(bson::from_document(document)?),
            ContentType::Blog => RawRecord::Blog(bson::from_document(document)?),
            ContentType::Publication => RawRecord::Publication(bson::from_document(document)?),
        })
    }

    /// Encode the record (without the type tag) for its MongoDB collection.
    #[cfg(feature = "ssr")]
    pub fn to_document(&self) -> Result<bson::Document, bson::ser::Error> {
        match self {
            RawRecord::News(item) => bson::to_document(item),
            RawRecord::Event(item) => bson::to_document(item),
            RawRecord::Project(item) => bson::to_document(item),
            RawRecord::Blog(item) => bson::to_document(item),
            RawRecord::Publication(item) => bson::to_document(item),
        }
    }
}

/// Field names written by the previous admin panel, as `(legacy, current)`.
const EVENT_LEGACY_KEYS: &[(&str, &str)] = &[
    ("baslik", "title"),
    ("ozet", "summary"),
    ("icerik", "content"),
    ("tarih", "date"),
    ("saat", "time"),
    ("konum", "location"),
    ("konum_lat", "latitude"),
    ("konum_lng", "longitude"),
    ("gorsel", "image"),
    ("kategori", "category"),
    ("kapasite", "capacity"),
    ("kayitli", "registered"),
    ("durum", "state"),
    ("meta_baslik", "meta_title"),
    ("meta_aciklama", "meta_description"),
    ("yayin_durumu", "status"),
    ("sliderda_goster", "featured"),
];

const CAMEL_CASE_LEGACY_KEYS: &[(&str, &str)] = &[
    ("metaTitle", "meta_title"),
    ("metaDescription", "meta_description"),
    ("publishStatus", "status"),
    ("showInSlider", "featured"),
];

const PUBLICATION_LEGACY_KEYS: &[(&str, &str)] = &[
    ("metaTitle", "meta_title"),
    ("metaDescription", "meta_description"),
    ("publishStatus", "status"),
    ("showInSlider", "featured"),
    ("downloadUrl", "download_url"),
];

/// Legacy field names still found in stored documents of `content_type`.
pub fn legacy_keys(content_type: ContentType) -> &'static [(&'static str, &'static str)] {
    match content_type {
        ContentType::Event => EVENT_LEGACY_KEYS,
        ContentType::Publication => PUBLICATION_LEGACY_KEYS,
        ContentType::News | ContentType::Project | ContentType::Blog => CAMEL_CASE_LEGACY_KEYS,
    }
}

/// Legacy spellings of the field currently named `current`.
pub fn legacy_names(content_type: ContentType, current: &str) -> Vec<&'static str> {
    legacy_keys(content_type)
        .iter()
        .filter(|(_, name)| *name == current)
        .map(|(legacy, _)| *legacy)
        .collect()
}

/// Rename legacy keys to their current names in place.
#[cfg(feature = "ssr")]
pub fn canonicalize_document(content_type: ContentType, document: &mut bson::Document) {
    for (legacy, current) in legacy_keys(content_type) {
        if let Some(value) = document.remove(*legacy) {
            if !document.contains_key(*current) {
                document.insert(*current, value);
            }
        }
    }
}

/// A member of the association's board (yönetim kurulu).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Role on the board ("Başkan", "Genel Sekreter", ...).
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Display position, ascending.
    #[serde(default)]
    pub order: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Which admin screen a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryScope {
    Events,
    News,
    Blog,
    Projects,
    Files,
}

impl From<ContentType> for CategoryScope {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::News => CategoryScope::News,
            ContentType::Event => CategoryScope::Events,
            ContentType::Project => CategoryScope::Projects,
            ContentType::Blog => CategoryScope::Blog,
            ContentType::Publication => CategoryScope::Files,
        }
    }
}

/// A display category managed from the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(alias = "type")]
    pub scope: CategoryScope,
    /// Hex colour, `#RRGGBB`.
    #[serde(default = "default_category_color")]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_category_color() -> String {
    "#3B82F6".to_string()
}

/// Kind of admin mutation recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Publish,
    Unpublish,
}

/// One entry of the admin activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    pub action: ActivityAction,
    /// Collection name the action touched (`news`, `events`, ...).
    pub entity: String,
    pub title: String,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accepts_legacy_turkish_fields() {
        let json = r###"{
            "id": "7",
            "baslik": "Spor Politikaları Çalıştayı",
            "ozet": "Yıllık çalıştay",
            "icerik": "Detaylar",
            "tarih": "2024-12-20",
            "saat": "10:00",
            "konum": "Ankara",
            "konum_lat": 39.92,
            "konum_lng": 32.85,
            "kategori": "Çalıştay",
            "durum": "Açık",
            "yayin_durumu": "yayinlandi",
            "sliderda_goster": true
        }"###;

        let event: EventItem = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Spor Politikaları Çalıştayı");
        assert_eq!(event.summary, "Yıllık çalıştay");
        assert_eq!(event.status, PublicationStatus::Published);
        assert!(event.featured);
        assert_eq!(event.latitude, Some(39.92));
        assert_eq!(event.state, "Açık");
    }

    #[test]
    fn test_news_defaults_for_missing_fields() {
        let json = r###"{ "id": "1", "title": "Forum" }"###;
        let news: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(news.status, PublicationStatus::Draft);
        assert!(!news.featured);
        assert!(news.image.is_none());
        assert!(news.date.is_empty());
    }

    #[test]
    fn test_raw_record_tagging() {
        let json = r###"{ "content_type": "blog", "id": "b1", "title": "Analiz", "publishStatus": "published" }"###;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.content_type(), ContentType::Blog);
        assert_eq!(record.id(), "b1");
        assert_eq!(record.status(), PublicationStatus::Published);
    }

    #[test]
    fn test_fields_roundtrip_keeps_type() {
        let mut fields = serde_json::Map::new();
        fields.insert("id".into(), "p1".into());
        fields.insert("title".into(), "Okul Sporları".into());
        fields.insert("start_date".into(), "2024-09-01".into());

        let record = RawRecord::from_fields(ContentType::Project, fields).unwrap();
        assert_eq!(record.content_type(), ContentType::Project);

        let back = record.to_fields().unwrap();
        assert_eq!(back["start_date"], "2024-09-01");
        assert!(!back.contains_key("content_type"));
    }

    #[test]
    fn test_set_status() {
        let mut fields = serde_json::Map::new();
        fields.insert("id".into(), "n1".into());
        let mut record = RawRecord::from_fields(ContentType::News, fields).unwrap();
        record.set_status(PublicationStatus::Published);
        assert_eq!(record.status(), PublicationStatus::Published);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_from_document_prefers_current_key_over_legacy() {
        // Legacy event whose status was later set under the current name
        let document = bson::doc! {
            "id": "7",
            "baslik": "Çalıştay",
            "tarih": "2024-12-20",
            "yayin_durumu": "yayinlandi",
            "sliderda_goster": true,
            "status": "draft",
        };

        let record = RawRecord::from_document(ContentType::Event, document).unwrap();
        assert_eq!(record.title(), "Çalıştay");
        assert_eq!(record.status(), PublicationStatus::Draft);
        assert!(record.featured());
    }

    #[test]
    fn test_legacy_names() {
        assert_eq!(legacy_names(ContentType::Event, "status"), vec!["yayin_durumu"]);
        assert_eq!(legacy_names(ContentType::News, "featured"), vec!["showInSlider"]);
        assert!(legacy_names(ContentType::Blog, "title").is_empty());
    }

    #[test]
    fn test_publication_reads_type_and_download_url() {
        let json = r###"{ "id": "y1", "title": "Rapor", "type": "Rapor", "year": "2024", "downloadUrl": "/files/rapor.pdf", "pages": 156 }"###;
        let publication: PublicationItem = serde_json::from_str(json).unwrap();
        assert_eq!(publication.kind, "Rapor");
        assert_eq!(publication.download_url.as_deref(), Some("/files/rapor.pdf"));
        assert_eq!(publication.pages, Some(156));
    }

    #[test]
    fn test_category_accepts_type_alias() {
        let json = r###"{ "id": "c1", "name": "Araştırma", "type": "news" }"###;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.scope, CategoryScope::News);
        assert_eq!(category.color, "#3B82F6");
    }
}
