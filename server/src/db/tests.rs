use super::*;
use crate::db::memory::MemoryVideoStore;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::env;

async fn setup_db() -> PgPool {
    dotenv().ok();
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .expect("Failed to connect to Postgres");
    // Drop tables for a clean start
    sqlx::query("DROP TABLE IF EXISTS videos")
        .execute(&pool)
        .await
        .unwrap();
    crate::db::db_migrate(&pool)
        .await
        .expect("Migration failed");
    pool
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_get_video() {
    let store = PgVideoStore::new(setup_db().await);
    let video = Video::new(Uuid::new_v4(), "title", "description");
    let inserted = store.insert(&video).await.unwrap();
    assert_eq!(inserted.id, video.id);

    let fetched = store.get(video.id).await.unwrap().unwrap();
    assert_eq!(fetched.user_id, video.user_id);
    assert_eq!(fetched.title, "title");
    assert!(fetched.thumbnail_url.is_none());

    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_thumbnail_url() {
    let store = PgVideoStore::new(setup_db().await);
    let mut video = store
        .insert(&Video::new(Uuid::new_v4(), "title", "description"))
        .await
        .unwrap();
    video.thumbnail_url = Some("http://localhost:8091/assets/abc.png".to_string());
    store.update(&video).await.unwrap();

    let fetched = store.get(video.id).await.unwrap().unwrap();
    assert_eq!(
        fetched.thumbnail_url.as_deref(),
        Some("http://localhost:8091/assets/abc.png")
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_video() {
    let store = PgVideoStore::new(setup_db().await);
    let video = Video::new(Uuid::new_v4(), "title", "description");
    assert!(matches!(
        store.update(&video).await,
        Err(sqlx::Error::RowNotFound)
    ));
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    let store = MemoryVideoStore::default();
    let mut video = Video::new(Uuid::new_v4(), "title", "description");
    store.insert(video.clone()).await;

    video.thumbnail_url = Some("http://localhost:8091/assets/x.jpeg".to_string());
    store.update(&video).await.unwrap();
    assert_eq!(store.get(video.id).await.unwrap(), Some(video));

    let stranger = Video::new(Uuid::new_v4(), "other", "");
    assert!(store.update(&stranger).await.is_err());
}

#[test]
fn test_video_json_field_names() {
    let video = Video::new(Uuid::new_v4(), "title", "description");
    let value = serde_json::to_value(&video).unwrap();
    for key in [
        "id",
        "createdAt",
        "updatedAt",
        "title",
        "description",
        "thumbnailURL",
        "videoURL",
        "userID",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}
