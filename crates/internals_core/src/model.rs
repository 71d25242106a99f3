use serde::{Deserialize, Serialize};

/// Opaque identifier the host assigns to pages and requests.
pub type ItemId = String;

/// Milliseconds since the Unix epoch, as reported by the host.
pub type TimestampMs = i64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfflinePage {
    pub online_url: String,
    pub creation_time: TimestampMs,
    pub id: ItemId,
    pub namespace: String,
    pub size: u64,
    pub file_path: String,
    pub last_access_time: TimestampMs,
    pub access_count: u32,
    pub is_expired: bool,
    pub request_origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavePageRequest {
    pub status: String,
    pub online_url: String,
    pub creation_time: TimestampMs,
    pub id: ItemId,
    pub namespace: String,
    pub last_attempt_time: TimestampMs,
    pub request_origin: String,
}

/// Which host subsystems currently write to the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingState {
    pub model_is_logging: bool,
    pub queue_is_logging: bool,
    pub prefetch_is_logging: bool,
}
