use chrono::{Duration, Utc};
use serde_json::{json, Map, Value};

use crate::content::record::ContentType;
use crate::db::models::RawRecord;
use crate::db::repository::ContentRepository;
use crate::error::AppError;

/// Sample content shown when the server runs in demo mode.
fn demo_records() -> Vec<(ContentType, Value)> {
    vec![
        (
            ContentType::News,
            json!({
                "id": "haber-1",
                "title": "Spor Ekonomisi Raporu 2024 Yayınlandı",
                "excerpt": "Türkiye'de spor ekonomisinin büyüklüğünü ve istihdama katkısını inceleyen yıllık raporumuz yayında.",
                "content": "## Öne çıkanlar\n\nRapor, **kulüp gelirlerini**, kamu harcamalarını ve spor turizmini ele alıyor.",
                "author": "SPOLDER Araştırma Ekibi",
                "date": "12 Aralık 2024",
                "category": "Araştırma",
                "status": "published",
                "featured": true
            }),
        ),
        (
            ContentType::News,
            json!({
                "id": "haber-2",
                "title": "Yerel Yönetimler ve Spor Forumu",
                "excerpt": "Belediye temsilcileri kent sporunun geleceğini tartıştı.",
                "content": "Forumda yerel spor tesislerinin erişilebilirliği konuşuldu.",
                "author": "SPOLDER",
                "date": "8 Aralık 2024",
                "category": "Etkinlik",
                "status": "published"
            }),
        ),
        (
            ContentType::News,
            json!({
                "id": "haber-3",
                "title": "Okul Sporları Çalışma Grubu Kuruldu",
                "content": "Çalışma grubu okul sporlarına ilişkin politika önerileri hazırlayacak.",
                "author": "SPOLDER",
                "date": "2024-11-30",
                "category": "Duyuru",
                "status": "published"
            }),
        ),
        (
            ContentType::Blog,
            json!({
                "id": "blog-1",
                "title": "Kadın Sporculara Destek Politikaları",
                "excerpt": "Kadınların spora katılımını artırmak için uygulanabilir öneriler.",
                "content": "Kadın sporcuların desteklenmesi için *teşvik* mekanizmaları gereklidir.",
                "author": "Prof. Elif Kaya",
                "date": "2024-11-25",
                "category": "Toplumsal Cinsiyet",
                "status": "published"
            }),
        ),
        (
            ContentType::Blog,
            json!({
                "id": "blog-2",
                "title": "Sporda Dijital Dönüşüm",
                "excerpt": "Veri analitiği kulüp yönetimini nasıl değiştiriyor?",
                "content": "Dijital araçlar performans analizinden taraftar ilişkilerine kadar her alanda kullanılıyor.",
                "author": "Dr. Mehmet Yılmaz",
                "date": "2024-11-18",
                "category": "Teknoloji",
                "status": "published"
            }),
        ),
        (
            ContentType::Event,
            json!({
                "id": "etkinlik-1",
                "title": "Spor Politikaları Çalıştayı",
                "summary": "Akademisyenler ve uygulayıcılar spor politikalarını tartışıyor.",
                "date": "2024-12-20",
                "time": "10:00",
                "location": "Ankara",
                "status": "published",
                "featured": true
            }),
        ),
        (
            ContentType::Project,
            json!({
                "id": "proje-1",
                "title": "Herkes İçin Spor",
                "description": "Dezavantajlı gruplara yönelik spor erişimi projesi.",
                "start_date": "2024-09-01",
                "status": "published",
                "featured": true
            }),
        ),
        (
            ContentType::Publication,
            json!({
                "id": "yayin-1",
                "title": "Türkiye Spor Ekonomisi Raporu 2024",
                "type": "Rapor",
                "year": "2024",
                "description": "Spor sektörünün ekonomik büyüklüğü ve istihdama katkısı.",
                "author": "SPOLDER Araştırma Ekibi",
                "pages": 86,
                "status": "published"
            }),
        ),
        (
            ContentType::Publication,
            json!({
                "id": "yayin-2",
                "title": "Okul Sporlarında Fırsat Eşitliği",
                "type": "Politika Belgesi",
                "year": "2023",
                "description": "Okul sporlarına erişimde bölgesel farklar ve öneriler.",
                "pages": 24,
                "status": "published"
            }),
        ),
    ]
}

/// Insert the demo records that are not already present.
///
/// Returns how many records were written. Existing ids are left untouched,
/// so seeding on every start is harmless.
pub async fn seed_demo_data(repo: &dyn ContentRepository) -> Result<usize, AppError> {
    tracing::info!("Starting demo data seeding...");

    let now = Utc::now();
    let mut seeded = 0;
    for (position, (content_type, fields)) in demo_records().into_iter().enumerate() {
        let Value::Object(mut fields) = fields else {
            continue;
        };
        let id = fields
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if repo.find(content_type, &id).await?.is_some() {
            tracing::info!(%content_type, %id, "Demo record already exists, skipping");
            continue;
        }

        // Older samples sort after newer ones when dates tie.
        let created_at = now - Duration::minutes(position as i64);
        stamp(&mut fields, created_at);
        let record = RawRecord::from_fields(content_type, fields)
            .map_err(|e| AppError::Internal(format!("Invalid demo record '{}': {}", id, e)))?;
        repo.upsert(record).await?;
        seeded += 1;
    }

    tracing::info!(seeded, "Demo data seeding complete");
    Ok(seeded)
}

fn stamp(fields: &mut Map<String, Value>, created_at: chrono::DateTime<Utc>) {
    fields.insert("created_at".into(), json!(created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::aggregator::Aggregator;
    use crate::content::presenter;
    use crate::db::memory::InMemoryContentRepository;

    #[tokio::test]
    async fn test_seeds_every_record_once() {
        let repo = InMemoryContentRepository::new();

        let first = seed_demo_data(&repo).await.unwrap();
        assert_eq!(first, demo_records().len());

        let second = seed_demo_data(&repo).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(repo.list(ContentType::News).await.unwrap().len(), 3);
        assert_eq!(repo.list(ContentType::Blog).await.unwrap().len(), 2);
        assert_eq!(repo.list(ContentType::Publication).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seeded_content_feeds_lookup() {
        let repo = InMemoryContentRepository::new();
        seed_demo_data(&repo).await.unwrap();
        let aggregator = Aggregator::new(&repo);

        let slides = presenter::slider_records(&aggregator).await;
        let ids: Vec<&str> = slides.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["etkinlik-1", "haber-1", "proje-1"]);

        let outcome = presenter::search(&aggregator, "spor ekonomisi").await;
        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.hits()[0].link, "/haber/haber-1");
    }
}
