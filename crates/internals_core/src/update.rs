use crate::{dump_as_json, AppState, Effect, Msg};

/// Shown in the dump info line once the dump text is on the clipboard.
pub const COPIED_TO_CLIPBOARD: &str = "Copied to clipboard!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialized { incognito } => {
            state.set_incognito(incognito);
            if incognito {
                Vec::new()
            } else {
                refresh_all()
            }
        }
        Msg::RefreshAllClicked => refresh_all(),
        Msg::RefreshLogsClicked => refresh_log(),
        Msg::DeletePagesClicked(ids) => vec![Effect::DeletePages(ids)],
        Msg::DeleteRequestsClicked(ids) => vec![Effect::DeleteRequests(ids)],
        Msg::AddToQueueClicked(raw) => {
            let urls = split_urls(&raw);
            let batch = state.open_add_batch(urls.len());
            state.status.save_url.clear();
            state.dirty_mut().status_text = true;
            urls.into_iter()
                .map(|url| Effect::AddToQueue { batch, url })
                .collect()
        }
        Msg::UrlAddFinished { batch, url, added } => {
            let line = if added {
                format!("{url} has been added to queue.\n")
            } else {
                format!("{url} failed to be added to queue.\n")
            };
            state.status.save_url.push_str(&line);
            state.dirty_mut().status_text = true;

            let mut effects = Vec::new();
            if added {
                effects.push(Effect::ClearUrlInput);
            }
            // Every completion counts, successful or not.
            if state.complete_add(batch) {
                effects.push(Effect::FetchRequestQueue);
            }
            effects
        }
        Msg::DumpClicked => {
            let text = match dump_as_json(state.offline_pages(), state.save_page_requests()) {
                Ok(text) => text,
                Err(err) => format!("Error: {err}"),
            };
            state.dump.open = true;
            state.dump.text = text;
            state.dump.info.clear();
            state.dirty_mut().dump = true;
            Vec::new()
        }
        Msg::CloseDumpClicked => {
            state.dump.open = false;
            state.dump.text.clear();
            state.dirty_mut().dump = true;
            Vec::new()
        }
        Msg::CopyDumpClicked => {
            if !state.dump.open {
                return (state, Vec::new());
            }
            state.dump.info = COPIED_TO_CLIPBOARD.to_string();
            state.dirty_mut().dump = true;
            vec![Effect::CopyDumpToClipboard]
        }
        Msg::SaveDumpClicked => {
            if !state.dump.open {
                return (state, Vec::new());
            }
            vec![Effect::WriteDump(state.dump.text.clone())]
        }
        Msg::DumpSaved(result) => {
            if !state.dump.open {
                return (state, Vec::new());
            }
            state.dump.info = match result {
                Ok(path) => format!("Saved to {path}"),
                Err(err) => format!("Error: {err}"),
            };
            state.dirty_mut().dump = true;
            Vec::new()
        }
        Msg::RecordPageModelToggled(enabled) => vec![Effect::SetRecordPageModel(enabled)],
        Msg::RecordRequestQueueToggled(enabled) => vec![Effect::SetRecordRequestQueue(enabled)],
        Msg::RecordPrefetchServiceToggled(enabled) => {
            vec![Effect::SetRecordPrefetchService(enabled)]
        }
        Msg::LimitlessPrefetchingToggled(enabled) => vec![Effect::SetLimitlessPrefetching(enabled)],
        Msg::ScheduleNwakeClicked => vec![Effect::ScheduleNwake],
        Msg::CancelNwakeClicked => vec![Effect::CancelNwake],
        Msg::ShowNotificationClicked => vec![Effect::ShowPrefetchNotification],
        Msg::GeneratePageBundleClicked(urls) => vec![Effect::GeneratePageBundle(urls)],
        Msg::GetOperationClicked(name) => vec![Effect::GetOperation(name)],
        Msg::DownloadArchiveClicked(name) => vec![Effect::DownloadArchive(name)],
        Msg::PrefetchActionFinished(result) => {
            state.status.prefetch_actions = match result {
                Ok(info) => info,
                Err(failure) => format!("Error: {}", failure.status_text()),
            };
            state.dirty_mut().status_text = true;
            Vec::new()
        }
        Msg::StoredPagesLoaded(pages) => {
            state.replace_offline_pages(pages);
            Vec::new()
        }
        Msg::RequestQueueLoaded(requests) => {
            state.replace_save_page_requests(requests);
            Vec::new()
        }
        Msg::NetworkStatusLoaded(status) => {
            state.set_network_status(status);
            Vec::new()
        }
        Msg::LimitlessPrefetchingLoaded(enabled) => {
            state.set_limitless_prefetching(enabled);
            Vec::new()
        }
        Msg::EventLogsLoaded(logs) => {
            state.replace_event_logs(logs);
            Vec::new()
        }
        Msg::LoggingStateLoaded(logging_state) => {
            state.set_logging_state(logging_state);
            Vec::new()
        }
        Msg::PagesDeleted(status) => {
            state.status.page_actions = status;
            state.dirty_mut().status_text = true;
            vec![Effect::FetchStoredPages]
        }
        Msg::RequestsDeleted(status) => {
            state.status.request_queue_actions = status;
            state.dirty_mut().status_text = true;
            vec![Effect::FetchRequestQueue]
        }
    };

    (state, effects)
}

fn refresh_all() -> Vec<Effect> {
    let mut effects = vec![
        Effect::FetchStoredPages,
        Effect::FetchRequestQueue,
        Effect::FetchNetworkStatus,
        Effect::FetchLimitlessPrefetching,
    ];
    effects.extend(refresh_log());
    effects
}

fn refresh_log() -> Vec<Effect> {
    vec![Effect::FetchEventLogs, Effect::FetchLoggingState]
}

/// Splits the URL input on commas. Entries are passed through untouched,
/// so an empty input still yields one (empty) URL.
fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',').map(ToOwned::to_owned).collect()
}
