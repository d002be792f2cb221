use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

/// A file lifted out of the multipart request body by the handler.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoUrlResponse {
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            service: "upload-service",
        }
    }
}
