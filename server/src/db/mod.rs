use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, PgPool};
use uuid::Uuid;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(rename = "thumbnailURL")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "videoURL")]
    pub video_url: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

impl Video {
    pub fn new(user_id: Uuid, title: &str, description: &str) -> Self {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            description: description.to_string(),
            thumbnail_url: None,
            video_url: None,
            user_id,
        }
    }
}

/// Read-modify-write access to video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get(&self, id: Uuid) -> sqlx::Result<Option<Video>>;
    async fn update(&self, video: &Video) -> sqlx::Result<()>;
}

#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        PgVideoStore { pool }
    }

    pub async fn insert(&self, video: &Video) -> sqlx::Result<Video> {
        sqlx::query_as::<_, Video>(
            "INSERT INTO videos (id, created_at, updated_at, title, description, thumbnail_url, video_url, user_id) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"
        )
        .bind(video.id)
        .bind(video.created_at)
        .bind(video.updated_at)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.user_id)
        .fetch_one(&self.pool)
        .await
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn get(&self, id: Uuid) -> sqlx::Result<Option<Video>> {
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(&self, video: &Video) -> sqlx::Result<()> {
        let result = sqlx::query(
            "UPDATE videos SET title = $1, description = $2, thumbnail_url = $3, video_url = $4, updated_at = $5 WHERE id = $6",
        )
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .bind(video.id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

/// Run database migrations: create the videos table if needed.
pub async fn db_migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS videos (
            id UUID PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            thumbnail_url TEXT,
            video_url TEXT,
            user_id UUID NOT NULL
        )
    "#,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests;
