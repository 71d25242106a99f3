use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use internals_core::{ActionFailure, Effect, Msg};
use internals_host::{
    HostCall, HostError, HostEvent, HostEvents, HostHandle, HostReply, HostServiceProxy,
};
use internals_logging::{internals_debug, internals_info, internals_warn};

use super::app::AppEvent;

/// Sends host effects to the host service and feeds completions back as
/// messages on the controller's event channel.
pub struct EffectRunner {
    host: HostHandle<Effect>,
}

impl EffectRunner {
    pub fn new(
        proxy: Arc<dyn HostServiceProxy>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let (host, events) = HostHandle::spawn(proxy)?;
        spawn_event_loop(events, event_tx)?;
        Ok(Self { host })
    }

    /// Submits every host effect. Local effects are returned to the caller.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut local = Vec::new();
        for effect in effects {
            match host_call(&effect) {
                Some(call) => {
                    internals_debug!("Submitting {:?}", call);
                    if !self.host.submit(effect, call) {
                        internals_warn!("Host dispatcher is gone; call dropped");
                    }
                }
                None => local.push(effect),
            }
        }
        local
    }
}

fn spawn_event_loop(
    events: HostEvents<Effect>,
    event_tx: mpsc::Sender<AppEvent>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("host-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if let Some(msg) = completion_msg(event) {
                    if event_tx.send(AppEvent::Host(msg)).is_err() {
                        break;
                    }
                }
            }
            internals_info!("Host event loop finished");
        })
        .map(|_| ())
}

/// The host call behind an effect, or `None` for local effects.
pub fn host_call(effect: &Effect) -> Option<HostCall> {
    let call = match effect {
        Effect::FetchStoredPages => HostCall::GetStoredPages,
        Effect::FetchRequestQueue => HostCall::GetRequestQueue,
        Effect::FetchNetworkStatus => HostCall::GetNetworkStatus,
        Effect::FetchLimitlessPrefetching => HostCall::GetLimitlessPrefetchingEnabled,
        Effect::FetchEventLogs => HostCall::GetEventLogs,
        Effect::FetchLoggingState => HostCall::GetLoggingState,
        Effect::DeletePages(ids) => HostCall::DeleteSelectedPages(ids.clone()),
        Effect::DeleteRequests(ids) => HostCall::DeleteSelectedRequests(ids.clone()),
        Effect::AddToQueue { url, .. } => HostCall::AddToRequestQueue(url.clone()),
        Effect::SetRecordPageModel(on) => HostCall::SetRecordPageModel(*on),
        Effect::SetRecordRequestQueue(on) => HostCall::SetRecordRequestQueue(*on),
        Effect::SetRecordPrefetchService(on) => HostCall::SetRecordPrefetchService(*on),
        Effect::SetLimitlessPrefetching(on) => HostCall::SetLimitlessPrefetchingEnabled(*on),
        Effect::ScheduleNwake => HostCall::ScheduleNwake,
        Effect::CancelNwake => HostCall::CancelNwake,
        Effect::ShowPrefetchNotification => HostCall::ShowPrefetchNotification,
        Effect::GeneratePageBundle(urls) => HostCall::GeneratePageBundle(urls.clone()),
        Effect::GetOperation(name) => HostCall::GetOperation(name.clone()),
        Effect::DownloadArchive(name) => HostCall::DownloadArchive(name.clone()),
        Effect::ClearUrlInput | Effect::CopyDumpToClipboard | Effect::WriteDump(_) => {
            return None
        }
    };
    Some(call)
}

/// Maps a finished host call to the message the update function expects.
///
/// Failures of fetches, deletions and toggles are logged and dropped so the
/// page keeps showing what it had. A failed add counts as not added.
pub fn completion_msg(event: HostEvent<Effect>) -> Option<Msg> {
    let HostEvent { tag, result } = event;
    match (tag, result) {
        (Effect::FetchStoredPages, Ok(HostReply::StoredPages(pages))) => {
            Some(Msg::StoredPagesLoaded(pages))
        }
        (Effect::FetchRequestQueue, Ok(HostReply::RequestQueue(requests))) => {
            Some(Msg::RequestQueueLoaded(requests))
        }
        (Effect::FetchNetworkStatus, Ok(HostReply::NetworkStatus(status))) => {
            Some(Msg::NetworkStatusLoaded(status))
        }
        (Effect::FetchLimitlessPrefetching, Ok(HostReply::LimitlessPrefetchingEnabled(on))) => {
            Some(Msg::LimitlessPrefetchingLoaded(on))
        }
        (Effect::FetchEventLogs, Ok(HostReply::EventLogs(logs))) => Some(Msg::EventLogsLoaded(logs)),
        (Effect::FetchLoggingState, Ok(HostReply::LoggingState(state))) => {
            Some(Msg::LoggingStateLoaded(state))
        }
        (Effect::DeletePages(_), Ok(HostReply::Status(status))) => Some(Msg::PagesDeleted(status)),
        (Effect::DeleteRequests(_), Ok(HostReply::Status(status))) => {
            Some(Msg::RequestsDeleted(status))
        }
        (Effect::AddToQueue { batch, url }, result) => {
            let added = match result {
                Ok(HostReply::Added(added)) => added,
                Ok(other) => {
                    internals_warn!("Unexpected reply to add {}: {:?}", url, other);
                    false
                }
                Err(err) => {
                    internals_warn!("Adding {} to the queue failed: {}", url, err);
                    false
                }
            };
            Some(Msg::UrlAddFinished { batch, url, added })
        }
        (Effect::DownloadArchive(_), Ok(_)) => None,
        (
            Effect::ScheduleNwake
            | Effect::CancelNwake
            | Effect::ShowPrefetchNotification
            | Effect::GeneratePageBundle(_)
            | Effect::GetOperation(_),
            Ok(HostReply::Info(info)),
        ) => Some(Msg::PrefetchActionFinished(Ok(info))),
        (
            Effect::ScheduleNwake
            | Effect::CancelNwake
            | Effect::ShowPrefetchNotification
            | Effect::GeneratePageBundle(_)
            | Effect::GetOperation(_)
            | Effect::DownloadArchive(_),
            Err(err),
        ) => Some(Msg::PrefetchActionFinished(Err(action_failure(err)))),
        (tag, Ok(HostReply::Done)) => {
            internals_debug!("{:?} done", tag);
            None
        }
        (tag, Ok(reply)) => {
            internals_warn!("Unexpected reply to {:?}: {:?}", tag, reply);
            None
        }
        (tag, Err(err)) => {
            internals_warn!("{:?} failed: {}", tag, err);
            None
        }
    }
}

fn action_failure(err: HostError) -> ActionFailure {
    match err.message() {
        Some(message) => ActionFailure::with_message(message),
        None => ActionFailure::raw(err.to_string()),
    }
}
