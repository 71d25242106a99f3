use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use internals_core::{ItemId, LoggingState, OfflinePage, SavePageRequest};
use internals_logging::{internals_debug, internals_trace};
use tokio::task::JoinSet;

use crate::proxy::{HostError, HostServiceProxy};

/// One call into the host service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    GetStoredPages,
    GetRequestQueue,
    GetNetworkStatus,
    GetLimitlessPrefetchingEnabled,
    GetEventLogs,
    GetLoggingState,
    DeleteSelectedPages(Vec<ItemId>),
    DeleteSelectedRequests(Vec<ItemId>),
    AddToRequestQueue(String),
    SetRecordPageModel(bool),
    SetRecordRequestQueue(bool),
    SetRecordPrefetchService(bool),
    SetLimitlessPrefetchingEnabled(bool),
    ScheduleNwake,
    CancelNwake,
    ShowPrefetchNotification,
    GeneratePageBundle(String),
    GetOperation(String),
    DownloadArchive(String),
}

/// Successful result of a [`HostCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostReply {
    StoredPages(Vec<OfflinePage>),
    RequestQueue(Vec<SavePageRequest>),
    NetworkStatus(String),
    LimitlessPrefetchingEnabled(bool),
    EventLogs(Vec<String>),
    LoggingState(LoggingState),
    /// Status string returned by a deletion.
    Status(String),
    /// Whether an add-to-queue call was accepted.
    Added(bool),
    /// Result text of a prefetch debug action.
    Info(String),
    Done,
}

/// Completion of a submitted call, carrying the caller's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent<T> {
    pub tag: T,
    pub result: Result<HostReply, HostError>,
}

/// Runs a single call against the proxy.
pub async fn execute(proxy: &dyn HostServiceProxy, call: HostCall) -> Result<HostReply, HostError> {
    match call {
        HostCall::GetStoredPages => proxy.get_stored_pages().await.map(HostReply::StoredPages),
        HostCall::GetRequestQueue => proxy.get_request_queue().await.map(HostReply::RequestQueue),
        HostCall::GetNetworkStatus => proxy
            .get_network_status()
            .await
            .map(HostReply::NetworkStatus),
        HostCall::GetLimitlessPrefetchingEnabled => proxy
            .get_limitless_prefetching_enabled()
            .await
            .map(HostReply::LimitlessPrefetchingEnabled),
        HostCall::GetEventLogs => proxy.get_event_logs().await.map(HostReply::EventLogs),
        HostCall::GetLoggingState => proxy.get_logging_state().await.map(HostReply::LoggingState),
        HostCall::DeleteSelectedPages(ids) => proxy
            .delete_selected_pages(&ids)
            .await
            .map(HostReply::Status),
        HostCall::DeleteSelectedRequests(ids) => proxy
            .delete_selected_requests(&ids)
            .await
            .map(HostReply::Status),
        HostCall::AddToRequestQueue(url) => {
            proxy.add_to_request_queue(&url).await.map(HostReply::Added)
        }
        HostCall::SetRecordPageModel(enabled) => proxy
            .set_record_page_model(enabled)
            .await
            .map(|()| HostReply::Done),
        HostCall::SetRecordRequestQueue(enabled) => proxy
            .set_record_request_queue(enabled)
            .await
            .map(|()| HostReply::Done),
        HostCall::SetRecordPrefetchService(enabled) => proxy
            .set_record_prefetch_service(enabled)
            .await
            .map(|()| HostReply::Done),
        HostCall::SetLimitlessPrefetchingEnabled(enabled) => proxy
            .set_limitless_prefetching_enabled(enabled)
            .await
            .map(|()| HostReply::Done),
        HostCall::ScheduleNwake => proxy.schedule_nwake().await.map(HostReply::Info),
        HostCall::CancelNwake => proxy.cancel_nwake().await.map(HostReply::Info),
        HostCall::ShowPrefetchNotification => proxy
            .show_prefetch_notification()
            .await
            .map(HostReply::Info),
        HostCall::GeneratePageBundle(urls) => proxy
            .generate_page_bundle(&urls)
            .await
            .map(HostReply::Info),
        HostCall::GetOperation(name) => proxy.get_operation(&name).await.map(HostReply::Info),
        HostCall::DownloadArchive(name) => proxy
            .download_archive(&name)
            .await
            .map(|()| HostReply::Done),
    }
}

/// Submits host calls without waiting for earlier ones to finish.
///
/// Every call runs as its own task on a runtime owned by a dispatcher
/// thread; completions arrive on the paired [`HostEvents`] in whatever
/// order they finish. Dropping every handle stops the dispatcher once the
/// calls already submitted have completed.
pub struct HostHandle<T> {
    call_tx: mpsc::Sender<(T, HostCall)>,
}

impl<T> Clone for HostHandle<T> {
    fn clone(&self) -> Self {
        Self {
            call_tx: self.call_tx.clone(),
        }
    }
}

/// Receiving side for completions of calls submitted through [`HostHandle`].
pub struct HostEvents<T> {
    event_rx: mpsc::Receiver<HostEvent<T>>,
}

impl<T: Send + 'static> HostHandle<T> {
    pub fn spawn(proxy: Arc<dyn HostServiceProxy>) -> io::Result<(Self, HostEvents<T>)> {
        let (call_tx, call_rx) = mpsc::channel::<(T, HostCall)>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("host-call")
            .build()?;

        thread::Builder::new()
            .name("host-dispatch".to_string())
            .spawn(move || {
                let mut in_flight = JoinSet::new();
                while let Ok((tag, call)) = call_rx.recv() {
                    while in_flight.try_join_next().is_some() {}
                    let proxy = proxy.clone();
                    let event_tx = event_tx.clone();
                    in_flight.spawn_on(
                        async move {
                            internals_trace!("host call started: {:?}", call);
                            let result = execute(proxy.as_ref(), call).await;
                            let _ = event_tx.send(HostEvent { tag, result });
                        },
                        runtime.handle(),
                    );
                }
                internals_debug!("host dispatcher draining {} calls", in_flight.len());
                runtime.block_on(async { while in_flight.join_next().await.is_some() {} });
                internals_debug!("host dispatcher stopped");
            })?;

        Ok((Self { call_tx }, HostEvents { event_rx }))
    }

    /// Queues a call. Returns `false` when the dispatcher is gone.
    pub fn submit(&self, tag: T, call: HostCall) -> bool {
        self.call_tx.send((tag, call)).is_ok()
    }
}

impl<T> HostEvents<T> {
    /// Blocks until the next completion. `None` once every handle is dropped
    /// and each call submitted before that has reported back.
    pub fn recv(&self) -> Option<HostEvent<T>> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<HostEvent<T>> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<HostEvent<T>> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
