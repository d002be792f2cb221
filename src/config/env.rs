use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    MinioEndpoint,
    MinioPort,
    MinioUseSsl,
    MinioAccessKey,
    MinioSecretKey,
    MinioBucketVideos,
    MinioBucketThumbnails,
    RabbitmqUrl,
    QueueVideoProcessing,
    QueueVideoFailed,
    MaxFileSize,
    AllowedMimeTypes,
    JwtSecret,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::MinioEndpoint => "MINIO_ENDPOINT",
            EnvKey::MinioPort => "MINIO_PORT",
            EnvKey::MinioUseSsl => "MINIO_USE_SSL",
            EnvKey::MinioAccessKey => "MINIO_ACCESS_KEY",
            EnvKey::MinioSecretKey => "MINIO_SECRET_KEY",
            EnvKey::MinioBucketVideos => "MINIO_BUCKET_VIDEOS",
            EnvKey::MinioBucketThumbnails => "MINIO_BUCKET_THUMBNAILS",
            EnvKey::RabbitmqUrl => "RABBITMQ_URL",
            EnvKey::QueueVideoProcessing => "RABBITMQ_QUEUE_VIDEO_PROCESSING",
            EnvKey::QueueVideoFailed => "RABBITMQ_QUEUE_VIDEO_FAILED",
            EnvKey::MaxFileSize => "MAX_FILE_SIZE",
            EnvKey::AllowedMimeTypes => "ALLOWED_MIME_TYPES",
            EnvKey::JwtSecret => "JWT_SECRET",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
