mod common;

use serde_json::json;

use spolder::content::fetcher::{ContentStore, PublishedFilter};
use spolder::content::record::{ContentType, PublicationStatus};
use spolder::db::models::{ActivityAction, ActivityEntry, Category, CategoryScope, RawRecord};
use spolder::db::activity_repository::ActivityRepository;
use spolder::db::category_repository::CategoryRepository;
use spolder::db::repository::ContentRepository;
use spolder::db::settings_repository::{SettingsRepository, SiteSettings};

fn news(id: &str, title: &str, status: &str, featured: bool) -> RawRecord {
    let serde_json::Value::Object(fields) = json!({
        "id": id,
        "title": title,
        "date": "2024-12-12",
        "status": status,
        "featured": featured
    }) else {
        unreachable!()
    };
    RawRecord::from_fields(ContentType::News, fields).unwrap()
}

#[tokio::test]
async fn content_upsert_find_and_list() {
    let env = common::TestEnv::start_mongo().await;
    let repo = env.state.content_repo.clone();

    repo.upsert(news("1", "Rapor", "draft", false)).await.unwrap();
    repo.upsert(news("2", "Forum", "published", true)).await.unwrap();

    let found = repo.find(ContentType::News, "1").await.unwrap().unwrap();
    assert_eq!(found.title(), "Rapor");
    assert!(repo.find(ContentType::Blog, "1").await.unwrap().is_none());

    // Replacing keeps a single document per id
    repo.upsert(news("1", "Güncel Rapor", "draft", false)).await.unwrap();
    let all = repo.list(ContentType::News).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), "1");
    assert_eq!(all[0].title(), "Güncel Rapor");
}

#[tokio::test]
async fn fetch_published_filters_status_and_featured() {
    let env = common::TestEnv::start_mongo().await;
    let repo = env.state.content_repo.clone();

    repo.upsert(news("1", "Taslak", "draft", true)).await.unwrap();
    repo.upsert(news("2", "Yayında", "published", false)).await.unwrap();
    repo.upsert(news("3", "Öne Çıkan", "published", true)).await.unwrap();

    let store = env.state.content_store.clone();
    let published = store
        .fetch_published(ContentType::News, PublishedFilter::default())
        .await
        .unwrap();
    let mut ids: Vec<&str> = published.iter().map(|r| r.id()).collect();
    ids.sort();
    assert_eq!(ids, vec!["2", "3"]);

    let featured = store
        .fetch_published(ContentType::News, PublishedFilter { featured_only: true })
        .await
        .unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id(), "3");
}

#[tokio::test]
async fn malformed_documents_do_not_hide_the_collection() {
    let env = common::TestEnv::start_mongo().await;
    let repo = env.state.content_repo.clone();
    repo.upsert(news("ok", "Sağlam", "published", false)).await.unwrap();

    // A document whose title is not a string
    env.db
        .as_ref()
        .unwrap()
        .collection::<bson::Document>("news")
        .insert_one(bson::doc! { "id": "bad", "title": 42, "status": "published" })
        .await
        .unwrap();

    let listed = repo.list(ContentType::News).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), "ok");

    let published = env
        .state
        .content_store
        .fetch_published(ContentType::News, PublishedFilter::default())
        .await
        .unwrap();
    assert_eq!(published.len(), 1);
}

#[tokio::test]
async fn set_status_and_delete_many() {
    let env = common::TestEnv::start_mongo().await;
    let repo = env.state.content_repo.clone();

    repo.upsert(news("1", "Bir", "draft", false)).await.unwrap();
    repo.upsert(news("2", "İki", "draft", false)).await.unwrap();

    assert!(repo
        .set_status(ContentType::News, "1", PublicationStatus::Published)
        .await
        .unwrap());
    assert!(!repo
        .set_status(ContentType::News, "missing", PublicationStatus::Published)
        .await
        .unwrap());
    let record = repo.find(ContentType::News, "1").await.unwrap().unwrap();
    assert_eq!(record.status(), PublicationStatus::Published);

    let deleted = repo
        .delete_many(ContentType::News, &["1".to_string(), "2".to_string(), "x".to_string()])
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert!(repo.list(ContentType::News).await.unwrap().is_empty());
}

#[tokio::test]
async fn categories_activity_and_settings() {
    let env = common::TestEnv::start_mongo().await;

    let categories = env.state.category_repo.clone();
    for (id, name, scope) in [
        ("c1", "Spor Politikası", CategoryScope::News),
        ("c2", "Atölye", CategoryScope::Events),
    ] {
        categories
            .upsert(Category {
                id: id.into(),
                name: name.into(),
                scope,
                color: "#3B82F6".into(),
                created_at: chrono::Utc::now(),
            })
            .await
            .unwrap();
    }
    assert_eq!(categories.list(None).await.unwrap().len(), 2);
    let news_only = categories.list(Some(CategoryScope::News)).await.unwrap();
    assert_eq!(news_only.len(), 1);
    assert_eq!(news_only[0].name, "Spor Politikası");
    assert!(categories.delete("c1").await.unwrap());
    assert!(!categories.delete("c1").await.unwrap());

    let activity = env.state.activity_repo.clone();
    for (i, title) in ["Eski", "Yeni"].into_iter().enumerate() {
        activity
            .record(ActivityEntry {
                id: format!("a{}", i),
                action: ActivityAction::Create,
                entity: "news".into(),
                title: title.into(),
                at: chrono::Utc::now() + chrono::Duration::seconds(i as i64),
            })
            .await
            .unwrap();
    }
    let recent = activity.recent(1).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].title, "Yeni");

    let settings = env.state.settings_repo.clone();
    assert_eq!(settings.get_settings().await.unwrap(), SiteSettings::default());
    let mut updated = SiteSettings::default();
    updated.contact.email = "info@spolder.org".into();
    settings.save_settings(updated.clone()).await.unwrap();
    settings.save_settings(updated.clone()).await.unwrap();
    assert_eq!(settings.get_settings().await.unwrap(), updated);
}

#[tokio::test]
async fn public_api_over_mongo() {
    let env = common::TestEnv::start_mongo().await;
    let server = env.server();
    common::login(&server).await;

    common::create_published(
        &server,
        "blog",
        json!({ "title": "Sporda Dijital Dönüşüm", "date": "2024-11-18", "featured": true }),
    )
    .await;
    common::create_published(
        &server,
        "projects",
        json!({ "title": "Herkes İçin Spor", "start_date": "2024-09-01", "featured": true }),
    )
    .await;

    let body: serde_json::Value = server.get("/api/v1/search?q=dijital").await.json();
    assert_eq!(body["count"], 1);

    // Blog posts are not slider material even when featured
    let slider: serde_json::Value = server.get("/api/v1/slider").await.json();
    let slides = slider["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0]["label"], "Proje");
}

#[tokio::test]
async fn legacy_event_documents_are_listed_and_survive_toggling() {
    let env = common::TestEnv::start_mongo().await;
    let events = env
        .db
        .as_ref()
        .unwrap()
        .collection::<bson::Document>("events");

    // Shape written by the previous admin panel
    events
        .insert_one(bson::doc! {
            "id": "7",
            "baslik": "Spor Politikaları Çalıştayı",
            "ozet": "Yıllık çalıştay",
            "tarih": "2024-12-20",
            "yayin_durumu": "yayinlandi",
            "sliderda_goster": true,
        })
        .await
        .unwrap();

    let featured = env
        .state
        .content_store
        .fetch_published(ContentType::Event, PublishedFilter { featured_only: true })
        .await
        .unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].title(), "Spor Politikaları Çalıştayı");

    let server = env.server();
    common::login(&server).await;

    let slider: serde_json::Value = server.get("/api/v1/slider").await.json();
    assert_eq!(slider["slides"][0]["id"], "7");
    assert_eq!(slider["slides"][0]["link"], "/etkinlik/7");

    let toggled: serde_json::Value = server
        .post("/api/v1/admin/events/7/toggle-publish")
        .await
        .json();
    assert_eq!(toggled["status"], "draft");

    // The record is still readable after the status change
    let listed: Vec<serde_json::Value> = server.get("/api/v1/admin/events").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "draft");
    assert_eq!(listed[0]["title"], "Spor Politikaları Çalıştayı");

    let stored = events
        .find_one(bson::doc! { "id": "7" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.get_str("status").unwrap(), "draft");
    assert!(!stored.contains_key("yayin_durumu"));

    let slider: serde_json::Value = server.get("/api/v1/slider").await.json();
    assert!(slider["slides"].as_array().unwrap().is_empty());

    let toggled: serde_json::Value = server
        .post("/api/v1/admin/events/7/toggle-publish")
        .await
        .json();
    assert_eq!(toggled["status"], "published");
    let detail: serde_json::Value = server.get("/api/v1/content/events/7").await.json();
    assert_eq!(detail["title"], "Spor Politikaları Çalıştayı");
}

#[tokio::test]
async fn camel_case_legacy_flags_are_honoured() {
    let env = common::TestEnv::start_mongo().await;
    let news = env
        .db
        .as_ref()
        .unwrap()
        .collection::<bson::Document>("news");
    news.insert_many(vec![
        bson::doc! {
            "id": "n1",
            "title": "Eski Haber",
            "date": "2024-12-01",
            "publishStatus": "published",
            "showInSlider": true,
        },
        bson::doc! {
            "id": "n2",
            "title": "Eski Taslak",
            "date": "2024-12-02",
            "publishStatus": "draft",
            "showInSlider": true,
        },
    ])
    .await
    .unwrap();

    let store = env.state.content_store.clone();
    let published = store
        .fetch_published(ContentType::News, PublishedFilter::default())
        .await
        .unwrap();
    let ids: Vec<&str> = published.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["n1"]);

    let repo = env.state.content_repo.clone();
    assert!(repo
        .set_status(ContentType::News, "n2", PublicationStatus::Published)
        .await
        .unwrap());
    let record = repo.find(ContentType::News, "n2").await.unwrap().unwrap();
    assert_eq!(record.status(), PublicationStatus::Published);
    assert!(record.featured());
}
