use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::infrastructure::storage::s3::StorageService;
use crate::modules::video::service::UploadService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub storage: StorageService,
    pub queue: RabbitMqService,
    pub uploads: Arc<UploadService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DbPool,
        storage: StorageService,
        queue: RabbitMqService,
        uploads: Arc<UploadService>,
    ) -> Self {
        Self {
            config,
            db,
            storage,
            queue,
            uploads,
        }
    }
}
