use anyhow::{Result, anyhow};
use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties, options::*, types::FieldTable,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::modules::video::ports::JobPublisher;

#[derive(Clone)]
pub struct RabbitMqService {
    url: String,
    queues: Vec<String>,
    conn: Arc<Mutex<Connection>>,
    channel: Arc<Mutex<Channel>>,
}

impl RabbitMqService {
    async fn connect(url: &str, queues: &[String]) -> Result<(Connection, Channel)> {
        info!("Connecting to RabbitMQ at {}", url);
        let conn = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow!("Failed to connect to RabbitMQ: {}", e))?;

        let channel = conn
            .create_channel()
            .await
            .map_err(|e| anyhow!("Failed to create channel: {}", e))?;

        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|e| anyhow!("Failed to enable publisher confirms: {}", e))?;

        for queue in queues {
            channel
                .queue_declare(
                    queue,
                    QueueDeclareOptions {
                        durable: true,
                        ..QueueDeclareOptions::default()
                    },
                    FieldTable::default(),
                )
                .await
                .map_err(|e| anyhow!("Failed to declare queue '{}': {}", queue, e))?;
        }

        info!("Connected to RabbitMQ, queues declared: {:?}", queues);
        Ok((conn, channel))
    }

    pub async fn new(url: &str, queues: Vec<String>) -> Result<Self> {
        let (conn, channel) = Self::connect(url, &queues).await?;

        Ok(Self {
            url: url.to_string(),
            queues,
            conn: Arc::new(Mutex::new(conn)),
            channel: Arc::new(Mutex::new(channel)),
        })
    }

    async fn reconnect(&self) -> Result<()> {
        warn!("RabbitMQ connection dropped, reconnecting...");
        let (conn, channel) = Self::connect(&self.url, &self.queues).await?;
        *self.conn.lock().await = conn;
        *self.channel.lock().await = channel;
        Ok(())
    }

    async fn publish_internal(&self, queue: &str, payload: &[u8]) -> Result<()> {
        let channel = self.channel.lock().await;

        channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_delivery_mode(2), // Persistent
            )
            .await
            .map_err(|e| anyhow!("Failed to publish message: {}", e))?
            .await
            .map_err(|e| anyhow!("Failed to confirm publication: {}", e))?;

        Ok(())
    }

    /// Publishes to the named queue, reconnecting once if the channel has
    /// gone away. A failure after the retry reaches the caller.
    pub async fn publish(&self, queue: &str, payload: &[u8]) -> Result<()> {
        if let Err(e) = self.publish_internal(queue, payload).await {
            warn!("RabbitMQ publish failed: {}. Retrying after reconnect.", e);
            self.reconnect().await?;
            self.publish_internal(queue, payload).await?;
        }

        Ok(())
    }

    /// Closes the channel, then the connection, in that order.
    pub async fn close(&self) -> Result<()> {
        let channel = self.channel.lock().await;
        channel
            .close(200, "shutdown")
            .await
            .map_err(|e| anyhow!("Failed to close channel: {}", e))?;

        let conn = self.conn.lock().await;
        conn.close(200, "shutdown")
            .await
            .map_err(|e| anyhow!("Failed to close connection: {}", e))?;

        info!("Disconnected from RabbitMQ");
        Ok(())
    }
}

#[async_trait]
impl JobPublisher for RabbitMqService {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<()> {
        RabbitMqService::publish(self, queue, payload).await
    }
}
