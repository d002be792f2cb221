use crate::config::env::{self, EnvKey};

// 500 MB, matching the upstream deployment default.
const DEFAULT_MAX_FILE_SIZE: u64 = 524_288_000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub minio_endpoint: String,
    pub minio_port: u16,
    pub minio_use_ssl: bool,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    pub videos_bucket: String,
    pub thumbnails_bucket: String,
    pub rabbitmq_url: String,
    pub queue_video_processing: String,
    pub queue_video_failed: String,
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            minio_endpoint: env::get(EnvKey::MinioEndpoint)?,
            minio_port: env::get_parsed(EnvKey::MinioPort, 9000),
            minio_use_ssl: env::get_parsed(EnvKey::MinioUseSsl, false),
            minio_access_key: env::get(EnvKey::MinioAccessKey)?,
            minio_secret_key: env::get(EnvKey::MinioSecretKey)?,
            videos_bucket: env::get(EnvKey::MinioBucketVideos)?,
            thumbnails_bucket: env::get(EnvKey::MinioBucketThumbnails)?,
            rabbitmq_url: env::get(EnvKey::RabbitmqUrl)?,
            queue_video_processing: env::get_or(EnvKey::QueueVideoProcessing, "video.processing"),
            queue_video_failed: env::get_or(EnvKey::QueueVideoFailed, "video.failed"),
            max_file_size: env::get_parsed(EnvKey::MaxFileSize, DEFAULT_MAX_FILE_SIZE),
            allowed_mime_types: parse_mime_list(&env::get_or(EnvKey::AllowedMimeTypes, "")),
            jwt_secret: env::get(EnvKey::JwtSecret)?,
        })
    }

    pub fn storage_endpoint_url(&self) -> String {
        let scheme = if self.minio_use_ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.minio_endpoint, self.minio_port)
    }
}

fn parse_mime_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_mime_list() {
        let types = parse_mime_list("video/mp4, video/webm,video/quicktime");
        assert_eq!(types, vec!["video/mp4", "video/webm", "video/quicktime"]);
    }

    #[test]
    fn empty_mime_list_yields_no_entries() {
        assert!(parse_mime_list("").is_empty());
        assert!(parse_mime_list(" , ").is_empty());
    }
}
