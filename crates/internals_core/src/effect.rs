use crate::{BatchId, ItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchStoredPages,
    FetchRequestQueue,
    FetchNetworkStatus,
    FetchLimitlessPrefetching,
    FetchEventLogs,
    FetchLoggingState,
    DeletePages(Vec<ItemId>),
    DeleteRequests(Vec<ItemId>),
    AddToQueue { batch: BatchId, url: String },
    SetRecordPageModel(bool),
    SetRecordRequestQueue(bool),
    SetRecordPrefetchService(bool),
    SetLimitlessPrefetching(bool),
    ScheduleNwake,
    CancelNwake,
    ShowPrefetchNotification,
    GeneratePageBundle(String),
    GetOperation(String),
    DownloadArchive(String),
    /// Clear the URL input after a successful add.
    ClearUrlInput,
    /// Select the dump text area and copy it to the clipboard.
    CopyDumpToClipboard,
    /// Persist the dump text to a file.
    WriteDump(String),
}
