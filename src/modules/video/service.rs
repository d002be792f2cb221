use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::dto::UploadedFile;
use super::events::VideoProcessingMessage;
use super::model::{NewVideo, Video, VideoStatus};
use super::ports::{JobPublisher, ObjectStorage, VideoStore};
use crate::common::error::AppError;
use crate::config::settings::AppConfig;

pub const DEFAULT_URL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Ingestion policy, fixed at startup.
#[derive(Clone)]
pub struct UploadSettings {
    pub videos_bucket: String,
    pub processing_queue: String,
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    pub url_ttl: Duration,
}

impl UploadSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            videos_bucket: config.videos_bucket.clone(),
            processing_queue: config.queue_video_processing.clone(),
            max_file_size: config.max_file_size,
            allowed_mime_types: config.allowed_mime_types.clone(),
            url_ttl: DEFAULT_URL_TTL,
        }
    }
}

pub struct UploadService {
    store: Arc<dyn VideoStore>,
    storage: Arc<dyn ObjectStorage>,
    publisher: Arc<dyn JobPublisher>,
    settings: UploadSettings,
}

impl UploadService {
    pub fn new(
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        publisher: Arc<dyn JobPublisher>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            store,
            storage,
            publisher,
            settings,
        }
    }

    /// Ingests one video: validate, store the binary, persist metadata,
    /// enqueue the processing job. A failure after the binary has been
    /// stored deletes it again before the error reaches the caller.
    pub async fn upload_video(
        &self,
        user_id: Uuid,
        file: UploadedFile,
    ) -> Result<Video, AppError> {
        self.validate(&file)?;

        let storage_key = generate_storage_key(&file.filename);
        let size = file.bytes.len() as i64;

        info!("storing video object: {}", storage_key);
        self.storage
            .put(
                &self.settings.videos_bucket,
                &storage_key,
                file.bytes,
                &file.content_type,
            )
            .await?;

        let record = NewVideo {
            user_id,
            filename: file.filename,
            storage_key: storage_key.clone(),
            mime_type: file.content_type,
            size,
            status: VideoStatus::Pending,
        };

        let video = match self.store.create(record).await {
            Ok(video) => video,
            Err(err) => {
                self.cleanup_object(&storage_key).await;
                return Err(AppError::Dependency(err));
            }
        };

        let message = VideoProcessingMessage {
            video_id: video.id,
            storage_key: video.storage_key.clone(),
            user_id: video.user_id,
            timestamp: OffsetDateTime::now_utc(),
        };
        let payload = match serde_json::to_vec(&message)
            .context("failed to serialize processing message")
        {
            Ok(payload) => payload,
            Err(err) => {
                self.cleanup_object(&storage_key).await;
                return Err(AppError::Dependency(err));
            }
        };

        if let Err(err) = self
            .publisher
            .publish(&self.settings.processing_queue, &payload)
            .await
        {
            // The metadata record stays behind with no job enqueued; the
            // caller retries the whole upload from scratch.
            self.cleanup_object(&storage_key).await;
            return Err(AppError::Dependency(err));
        }

        info!("video uploaded: {}", video.id);
        Ok(video)
    }

    /// Fetches a video, failing when it does not exist or is owned by
    /// someone else. Every other read and the delete build on this check.
    pub async fn get_video_by_id(
        &self,
        video_id: Uuid,
        user_id: Uuid,
    ) -> Result<Video, AppError> {
        let video = self
            .store
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

        if video.user_id != user_id {
            return Err(AppError::Forbidden(
                "video belongs to another user".to_string(),
            ));
        }

        Ok(video)
    }

    pub async fn list_user_videos(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos = self.store.find_all_by_user(user_id).await?;
        Ok(videos)
    }

    pub async fn get_video_url(&self, video_id: Uuid, user_id: Uuid) -> Result<String, AppError> {
        let video = self.get_video_by_id(video_id, user_id).await?;

        let url = self
            .storage
            .presigned_url(
                &self.settings.videos_bucket,
                &video.storage_key,
                self.settings.url_ttl,
            )
            .await?;

        Ok(url)
    }

    /// Deletes the stored object, then the metadata record. An object-store
    /// failure is logged and does not block record deletion.
    pub async fn delete_video(&self, video_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let video = self.get_video_by_id(video_id, user_id).await?;

        if let Err(err) = self
            .storage
            .delete(&self.settings.videos_bucket, &video.storage_key)
            .await
        {
            error!(
                "failed to delete object '{}' for video {}: {}",
                video.storage_key, video.id, err
            );
        }

        self.store.delete(video.id).await?;

        info!("video deleted: {}", video.id);
        Ok(())
    }

    fn validate(&self, file: &UploadedFile) -> Result<(), AppError> {
        if file.bytes.is_empty() {
            return Err(AppError::Validation("no file provided".to_string()));
        }

        if file.bytes.len() as u64 > self.settings.max_file_size {
            return Err(AppError::Validation(format!(
                "file size exceeds maximum allowed ({} bytes)",
                self.settings.max_file_size
            )));
        }

        if !self
            .settings
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed == &file.content_type)
        {
            return Err(AppError::Validation(format!(
                "invalid file type '{}', allowed types: {}",
                file.content_type,
                self.settings.allowed_mime_types.join(", ")
            )));
        }

        Ok(())
    }

    async fn cleanup_object(&self, storage_key: &str) {
        if let Err(err) = self
            .storage
            .delete(&self.settings.videos_bucket, storage_key)
            .await
        {
            warn!("failed to clean up object '{}': {}", storage_key, err);
        }
    }
}

/// Derives the object-store key for an upload: a fresh UUID plus the
/// original extension when it is purely alphanumeric. Nothing else of the
/// client-supplied name reaches the key.
fn generate_storage_key(filename: &str) -> String {
    let id = Uuid::new_v4();
    match filename.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!("{}.{}", id, ext.to_ascii_lowercase())
        }
        _ => id.to_string(),
    }
}
