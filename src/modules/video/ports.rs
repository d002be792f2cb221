//! Seams between the orchestrator and its external collaborators. The
//! infrastructure layer provides the production implementations; tests swap
//! in in-memory ones.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use uuid::Uuid;

use super::model::{NewVideo, Video};

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `key`, overwriting any existing object. Callers
    /// own key uniqueness. Returns the store's upload confirmation tag.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String>;

    /// Best-effort removal; deleting an absent key succeeds.
    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;

    /// Time-limited signed download URL. Expiry is a hard cutoff.
    async fn presigned_url(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String>;
}

#[async_trait]
pub trait JobPublisher: Send + Sync {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<()>;
}

#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create(&self, video: NewVideo) -> Result<Video>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>>;
    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Video>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}
