use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Message published to the processing queue after a successful ingestion.
/// Field names and the RFC 3339 timestamp are the wire contract the
/// downstream worker consumes; they must stay stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProcessingMessage {
    pub video_id: Uuid,
    pub storage_key: String,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys_and_rfc3339_timestamp() {
        let message = VideoProcessingMessage {
            video_id: Uuid::new_v4(),
            storage_key: "abc.mp4".to_string(),
            user_id: Uuid::new_v4(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        };

        let value: serde_json::Value =
            serde_json::from_slice(&serde_json::to_vec(&message).unwrap()).unwrap();

        assert_eq!(value["videoId"], message.video_id.to_string());
        assert_eq!(value["storageKey"], "abc.mp4");
        assert_eq!(value["userId"], message.user_id.to_string());
        assert_eq!(value["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn round_trips_through_json() {
        let message = VideoProcessingMessage {
            video_id: Uuid::new_v4(),
            storage_key: "clip.webm".to_string(),
            user_id: Uuid::new_v4(),
            timestamp: OffsetDateTime::now_utc(),
        };

        let decoded: VideoProcessingMessage =
            serde_json::from_slice(&serde_json::to_vec(&message).unwrap()).unwrap();

        assert_eq!(decoded.video_id, message.video_id);
        assert_eq!(decoded.storage_key, message.storage_key);
        assert_eq!(decoded.user_id, message.user_id);
    }
}
