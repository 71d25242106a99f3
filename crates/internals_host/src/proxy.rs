use internals_core::{ItemId, LoggingState, OfflinePage, SavePageRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host rejected the call with a message.
    #[error("{message}")]
    Failed { message: String },
    /// The host failed with a bare value and no message.
    #[error("{0}")]
    Raw(String),
    #[error("host service is not available")]
    Disconnected,
}

impl HostError {
    pub fn failed(message: impl Into<String>) -> Self {
        HostError::Failed {
            message: message.into(),
        }
    }

    /// The error message, when the host supplied one.
    pub fn message(&self) -> Option<&str> {
        match self {
            HostError::Failed { message } => Some(message),
            HostError::Raw(_) => None,
            HostError::Disconnected => Some("host service is not available"),
        }
    }
}

/// Calls the debug page makes into the host application.
#[async_trait::async_trait]
pub trait HostServiceProxy: Send + Sync {
    async fn get_stored_pages(&self) -> Result<Vec<OfflinePage>, HostError>;

    async fn get_request_queue(&self) -> Result<Vec<SavePageRequest>, HostError>;

    async fn get_network_status(&self) -> Result<String, HostError>;

    async fn get_limitless_prefetching_enabled(&self) -> Result<bool, HostError>;

    async fn get_event_logs(&self) -> Result<Vec<String>, HostError>;

    async fn get_logging_state(&self) -> Result<LoggingState, HostError>;

    /// Deletes the given pages and returns a status string.
    async fn delete_selected_pages(&self, ids: &[ItemId]) -> Result<String, HostError>;

    /// Deletes the given requests and returns a status string.
    async fn delete_selected_requests(&self, ids: &[ItemId]) -> Result<String, HostError>;

    /// Queues a save-page request; `false` when the host refused the URL.
    async fn add_to_request_queue(&self, url: &str) -> Result<bool, HostError>;

    async fn set_record_page_model(&self, enabled: bool) -> Result<(), HostError>;

    async fn set_record_request_queue(&self, enabled: bool) -> Result<(), HostError>;

    async fn set_record_prefetch_service(&self, enabled: bool) -> Result<(), HostError>;

    async fn set_limitless_prefetching_enabled(&self, enabled: bool) -> Result<(), HostError>;

    async fn schedule_nwake(&self) -> Result<String, HostError>;

    async fn cancel_nwake(&self) -> Result<String, HostError>;

    async fn show_prefetch_notification(&self) -> Result<String, HostError>;

    /// Requests a page bundle for a comma-separated list of URLs.
    async fn generate_page_bundle(&self, urls: &str) -> Result<String, HostError>;

    async fn get_operation(&self, name: &str) -> Result<String, HostError>;

    async fn download_archive(&self, name: &str) -> Result<(), HostError>;
}
