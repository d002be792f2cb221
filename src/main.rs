use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod middleware;
mod modules;
mod routes;
mod state;

use config::settings::AppConfig;
use infrastructure::db::pool::connect_to_db;
use infrastructure::queue::rabbitmq::RabbitMqService;
use infrastructure::storage::s3::StorageService;
use modules::video::repository::VideoRepository;
use modules::video::service::{UploadService, UploadSettings};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting upload service...");

    let config = AppConfig::new().context("failed to load configuration from environment")?;

    let db = connect_to_db(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    let storage = StorageService::new(
        &config.storage_endpoint_url(),
        &config.minio_access_key,
        &config.minio_secret_key,
    )
    .await;
    storage.ensure_bucket(&config.videos_bucket).await?;
    storage.ensure_bucket(&config.thumbnails_bucket).await?;

    let queue = RabbitMqService::new(
        &config.rabbitmq_url,
        vec![
            config.queue_video_processing.clone(),
            config.queue_video_failed.clone(),
        ],
    )
    .await?;

    let uploads = Arc::new(UploadService::new(
        Arc::new(VideoRepository::new(db.clone())),
        Arc::new(storage.clone()),
        Arc::new(queue.clone()),
        UploadSettings::from_config(&config),
    ));

    let state = AppState::new(config.clone(), db, storage, queue.clone(), uploads);
    let app = app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server_port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Channel before connection.
    queue.close().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
