use crate::{BatchId, ItemId, LoggingState, OfflinePage, SavePageRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page finished loading; `incognito` is read once from the host environment.
    Initialized { incognito: bool },
    /// User clicked Refresh.
    RefreshAllClicked,
    /// User clicked Refresh logs.
    RefreshLogsClicked,
    /// User asked to delete the selected stored pages.
    DeletePagesClicked(Vec<ItemId>),
    /// User asked to delete the selected queued requests.
    DeleteRequestsClicked(Vec<ItemId>),
    /// User submitted the comma-separated URL input.
    AddToQueueClicked(String),
    DumpClicked,
    CloseDumpClicked,
    CopyDumpClicked,
    /// User asked to write the current dump to a file.
    SaveDumpClicked,
    RecordPageModelToggled(bool),
    RecordRequestQueueToggled(bool),
    RecordPrefetchServiceToggled(bool),
    LimitlessPrefetchingToggled(bool),
    ScheduleNwakeClicked,
    CancelNwakeClicked,
    ShowNotificationClicked,
    GeneratePageBundleClicked(String),
    GetOperationClicked(String),
    DownloadArchiveClicked(String),

    /// Host returned the stored pages.
    StoredPagesLoaded(Vec<OfflinePage>),
    /// Host returned the request queue.
    RequestQueueLoaded(Vec<SavePageRequest>),
    NetworkStatusLoaded(String),
    LimitlessPrefetchingLoaded(bool),
    EventLogsLoaded(Vec<String>),
    LoggingStateLoaded(LoggingState),
    /// Host finished deleting pages and reported a status.
    PagesDeleted(String),
    /// Host finished deleting requests and reported a status.
    RequestsDeleted(String),
    /// One add-to-queue call of a batch completed.
    UrlAddFinished {
        batch: BatchId,
        url: String,
        added: bool,
    },
    /// A prefetch debug action completed.
    PrefetchActionFinished(Result<String, ActionFailure>),
    /// The dump file write completed with the written path or an error text.
    DumpSaved(Result<String, String>),
}

/// Failure reported by a host call whose error is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub message: Option<String>,
    pub raw: String,
}

impl ActionFailure {
    pub fn with_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            raw: message.clone(),
            message: Some(message),
        }
    }

    pub fn raw(raw: impl Into<String>) -> Self {
        Self {
            message: None,
            raw: raw.into(),
        }
    }

    /// The message when there is one, otherwise the raw error value.
    pub fn status_text(&self) -> &str {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(&self.raw)
    }
}
