use std::collections::BTreeMap;

use crate::view_model::{request_row, stored_page_row, AppViewModel, DumpView};
use crate::{CompletionBarrier, LoggingState, OfflinePage, SavePageRequest};

pub type BatchId = u64;

/// Page sections that need to be re-rendered.
///
/// Tables are rebuilt only when their own data changes so that checkbox
/// selections survive unrelated updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtySections {
    pub stored_pages: bool,
    pub request_queue: bool,
    pub network_status: bool,
    pub limitless_prefetching: bool,
    pub event_logs: bool,
    pub logging_state: bool,
    pub status_text: bool,
    pub dump: bool,
    pub controls: bool,
}

impl DirtySections {
    pub fn all() -> Self {
        Self {
            stored_pages: true,
            request_queue: true,
            network_status: true,
            limitless_prefetching: true,
            event_logs: true,
            logging_state: true,
            status_text: true,
            dump: true,
            controls: true,
        }
    }

    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DumpState {
    pub(crate) open: bool,
    pub(crate) text: String,
    pub(crate) info: String,
}

/// Status lines shown next to each group of controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct StatusText {
    pub(crate) page_actions: String,
    pub(crate) request_queue_actions: String,
    pub(crate) save_url: String,
    pub(crate) prefetch_actions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    offline_pages: Vec<OfflinePage>,
    save_page_requests: Vec<SavePageRequest>,
    network_status: String,
    limitless_prefetching: bool,
    event_logs: Vec<String>,
    logging_state: LoggingState,
    pub(crate) status: StatusText,
    pub(crate) dump: DumpState,
    add_batches: BTreeMap<BatchId, CompletionBarrier>,
    next_batch: BatchId,
    incognito: bool,
    dirty: DirtySections,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            stored_pages: self
                .offline_pages
                .iter()
                .enumerate()
                .map(|(index, page)| stored_page_row(index, page))
                .collect(),
            request_queue: self.save_page_requests.iter().map(request_row).collect(),
            network_status: self.network_status.clone(),
            limitless_prefetching: self.limitless_prefetching,
            event_logs: self.event_logs.clone(),
            logging_state: self.logging_state,
            page_actions_info: self.status.page_actions.clone(),
            request_queue_actions_info: self.status.request_queue_actions.clone(),
            save_url_state: self.status.save_url.clone(),
            prefetch_actions_info: self.status.prefetch_actions.clone(),
            dump: self.dump.open.then(|| DumpView {
                text: self.dump.text.clone(),
                info: self.dump.info.clone(),
            }),
            controls_disabled: self.incognito,
        }
    }

    pub fn offline_pages(&self) -> &[OfflinePage] {
        &self.offline_pages
    }

    pub fn save_page_requests(&self) -> &[SavePageRequest] {
        &self.save_page_requests
    }

    pub fn is_incognito(&self) -> bool {
        self.incognito
    }

    /// Number of add-to-queue batches still waiting for completions.
    pub fn pending_add_batches(&self) -> usize {
        self.add_batches.len()
    }

    /// Returns the sections changed since the last call and clears them.
    pub fn consume_dirty(&mut self) -> DirtySections {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn dirty_mut(&mut self) -> &mut DirtySections {
        &mut self.dirty
    }

    pub(crate) fn set_incognito(&mut self, incognito: bool) {
        self.incognito = incognito;
        self.dirty.controls = true;
    }

    pub(crate) fn replace_offline_pages(&mut self, pages: Vec<OfflinePage>) {
        self.offline_pages = pages;
        self.dirty.stored_pages = true;
    }

    pub(crate) fn replace_save_page_requests(&mut self, requests: Vec<SavePageRequest>) {
        self.save_page_requests = requests;
        self.dirty.request_queue = true;
    }

    pub(crate) fn set_network_status(&mut self, status: String) {
        self.network_status = status;
        self.dirty.network_status = true;
    }

    pub(crate) fn set_limitless_prefetching(&mut self, enabled: bool) {
        self.limitless_prefetching = enabled;
        self.dirty.limitless_prefetching = true;
    }

    pub(crate) fn replace_event_logs(&mut self, logs: Vec<String>) {
        self.event_logs = logs;
        self.dirty.event_logs = true;
    }

    pub(crate) fn set_logging_state(&mut self, logging_state: LoggingState) {
        self.logging_state = logging_state;
        self.dirty.logging_state = true;
    }

    /// Opens a barrier for `expected` add-to-queue completions.
    pub(crate) fn open_add_batch(&mut self, expected: usize) -> BatchId {
        self.next_batch += 1;
        let batch = self.next_batch;
        self.add_batches
            .insert(batch, CompletionBarrier::new(expected));
        batch
    }

    /// Records one completion for `batch`; `true` when the batch just finished.
    pub(crate) fn complete_add(&mut self, batch: BatchId) -> bool {
        let Some(barrier) = self.add_batches.get_mut(&batch) else {
            return false;
        };
        let released = barrier.arrive();
        if barrier.is_released() {
            self.add_batches.remove(&batch);
        }
        released
    }
}
