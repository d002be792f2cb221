use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use std::time::Duration;
use tracing::info;

use crate::modules::video::ports::ObjectStorage;

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
}

impl StorageService {
    pub async fn new(endpoint: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("Connected to S3 (MinIO) at {}", endpoint);

        Self { client }
    }

    /// Creates the bucket when it does not exist yet. Repeated calls are
    /// no-ops.
    pub async fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => {
                info!("Bucket '{}' already exists", bucket);
                Ok(())
            }
            Err(_) => {
                self.client
                    .create_bucket()
                    .bucket(bucket)
                    .send()
                    .await
                    .with_context(|| format!("failed to create bucket '{bucket}'"))?;
                info!("Bucket '{}' created", bucket);
                Ok(())
            }
        }
    }

    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String> {
        let result = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .with_context(|| format!("failed to store object '{key}'"))?;

        Ok(result.e_tag().unwrap_or_default().to_string())
    }

    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete object '{key}'"))?;

        Ok(())
    }

    pub async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(expires_in)?)
            .await
            .with_context(|| format!("failed to presign url for '{key}'"))?;

        Ok(presigned.uri().to_string())
    }
}

#[async_trait]
impl ObjectStorage for StorageService {
    async fn put(&self, bucket: &str, key: &str, bytes: Bytes, content_type: &str) -> Result<String> {
        self.put_object(bucket, key, bytes, content_type).await
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.delete_object(bucket, key).await
    }

    async fn presigned_url(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String> {
        self.presigned_get_url(bucket, key, expires_in).await
    }
}
