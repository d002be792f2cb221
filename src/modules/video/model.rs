use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of an uploaded video. Ingestion only ever writes `Pending`;
/// the remaining states belong to the downstream processing worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "video_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoStatus {
    Pending,
    Processing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub storage_key: String,
    pub mime_type: String,
    pub size: i64,
    pub status: VideoStatus,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

/// Insertable record; id and created_at are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub user_id: Uuid,
    pub filename: String,
    pub storage_key: String,
    pub mime_type: String,
    pub size: i64,
    pub status: VideoStatus,
}
