use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::{NewVideo, Video};
use super::ports::VideoStore;

pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (user_id, filename, storage_key, mime_type, size, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(video.user_id)
        .bind(video.filename)
        .bind(video.storage_key)
        .bind(video.mime_type)
        .bind(video.size)
        .bind(video.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            "SELECT * FROM videos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
