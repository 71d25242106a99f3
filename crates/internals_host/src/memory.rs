//! Simulated host service used by the standalone debug page and in tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use internals_core::{ItemId, LoggingState, OfflinePage, SavePageRequest, TimestampMs};
use internals_logging::internals_debug;

use crate::proxy::{HostError, HostServiceProxy};
use crate::seed::HostSeed;

/// Source of "now" in milliseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> TimestampMs + Send + Sync>;

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_FAILURE: &str = "Failure";

const QUEUED_STATUS: &str = "available";
const QUEUED_NAMESPACE: &str = "async_loading";

#[derive(Debug, Default)]
struct HostData {
    pages: Vec<OfflinePage>,
    requests: Vec<SavePageRequest>,
    network_status: String,
    limitless_prefetching: bool,
    logging: LoggingState,
    logs: Vec<String>,
    next_request_id: u64,
    nwake_scheduled: bool,
    /// Bundle operations by name, with the URLs each one covers.
    operations: BTreeMap<String, Vec<String>>,
}

pub struct InMemoryHost {
    data: Mutex<HostData>,
    clock: Clock,
}

impl InMemoryHost {
    pub fn new(seed: HostSeed) -> Self {
        Self::with_clock(seed, Arc::new(|| Utc::now().timestamp_millis()))
    }

    pub fn with_clock(seed: HostSeed, clock: Clock) -> Self {
        let next_request_id = seed
            .save_page_requests
            .iter()
            .filter_map(|request| request.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let data = HostData {
            pages: seed.offline_pages,
            requests: seed.save_page_requests,
            network_status: seed.network_status,
            limitless_prefetching: seed.limitless_prefetching_enabled,
            logging: seed.logging_state,
            logs: seed.event_logs,
            next_request_id,
            nwake_scheduled: false,
            operations: BTreeMap::new(),
        };
        Self {
            data: Mutex::new(data),
            clock,
        }
    }

    pub fn set_network_status(&self, status: impl Into<String>) {
        self.lock().network_status = status.into();
    }

    pub fn is_nwake_scheduled(&self) -> bool {
        self.lock().nwake_scheduled
    }

    fn lock(&self) -> MutexGuard<'_, HostData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log_line(&self, data: &mut HostData, subsystem: Subsystem, message: String) {
        let enabled = match subsystem {
            Subsystem::Model => data.logging.model_is_logging,
            Subsystem::Queue => data.logging.queue_is_logging,
            Subsystem::Prefetch => data.logging.prefetch_is_logging,
        };
        if !enabled {
            return;
        }
        let now = (self.clock)();
        let stamp = DateTime::<Utc>::from_timestamp_millis(now)
            .map(|at| at.format("%Y %m %d %H:%M:%S").to_string())
            .unwrap_or_default();
        data.logs.push(format!("{stamp}: {}: {message}", subsystem.label()));
    }
}

#[derive(Debug, Clone, Copy)]
enum Subsystem {
    Model,
    Queue,
    Prefetch,
}

impl Subsystem {
    fn label(self) -> &'static str {
        match self {
            Subsystem::Model => "OfflinePageModel",
            Subsystem::Queue => "RequestQueue",
            Subsystem::Prefetch => "PrefetchService",
        }
    }
}

/// Removes every item whose id is listed. Returns how many ids matched.
fn remove_by_id<T>(items: &mut Vec<T>, ids: &[ItemId], id_of: impl Fn(&T) -> &str) -> usize {
    let before = items.len();
    items.retain(|item| !ids.iter().any(|id| id == id_of(item)));
    before - items.len()
}

fn delete_status(requested: &[ItemId], removed: usize) -> String {
    let mut unique = requested.to_vec();
    unique.sort();
    unique.dedup();
    if removed == unique.len() {
        STATUS_SUCCESS.to_string()
    } else {
        STATUS_FAILURE.to_string()
    }
}

fn is_savable_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some())
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl HostServiceProxy for InMemoryHost {
    async fn get_stored_pages(&self) -> Result<Vec<OfflinePage>, HostError> {
        Ok(self.lock().pages.clone())
    }

    async fn get_request_queue(&self) -> Result<Vec<SavePageRequest>, HostError> {
        Ok(self.lock().requests.clone())
    }

    async fn get_network_status(&self) -> Result<String, HostError> {
        Ok(self.lock().network_status.clone())
    }

    async fn get_limitless_prefetching_enabled(&self) -> Result<bool, HostError> {
        Ok(self.lock().limitless_prefetching)
    }

    async fn get_event_logs(&self) -> Result<Vec<String>, HostError> {
        Ok(self.lock().logs.clone())
    }

    async fn get_logging_state(&self) -> Result<LoggingState, HostError> {
        Ok(self.lock().logging)
    }

    async fn delete_selected_pages(&self, ids: &[ItemId]) -> Result<String, HostError> {
        let mut data = self.lock();
        let removed = remove_by_id(&mut data.pages, ids, |page| page.id.as_str());
        internals_debug!("deleted {} of {} requested pages", removed, ids.len());
        self.log_line(
            &mut data,
            Subsystem::Model,
            format!("Deleted {removed} page(s)"),
        );
        Ok(delete_status(ids, removed))
    }

    async fn delete_selected_requests(&self, ids: &[ItemId]) -> Result<String, HostError> {
        let mut data = self.lock();
        let removed = remove_by_id(&mut data.requests, ids, |request| request.id.as_str());
        internals_debug!("deleted {} of {} requested requests", removed, ids.len());
        self.log_line(
            &mut data,
            Subsystem::Queue,
            format!("Removed {removed} request(s)"),
        );
        Ok(delete_status(ids, removed))
    }

    async fn add_to_request_queue(&self, url: &str) -> Result<bool, HostError> {
        let mut data = self.lock();
        if !is_savable_url(url) {
            self.log_line(&mut data, Subsystem::Queue, format!("Rejected {url:?}"));
            return Ok(false);
        }
        let id = data.next_request_id;
        data.next_request_id += 1;
        data.requests.push(SavePageRequest {
            status: QUEUED_STATUS.to_string(),
            online_url: url.to_string(),
            creation_time: (self.clock)(),
            id: id.to_string(),
            namespace: QUEUED_NAMESPACE.to_string(),
            last_attempt_time: 0,
            request_origin: String::new(),
        });
        self.log_line(
            &mut data,
            Subsystem::Queue,
            format!("Added request {id} for {url}"),
        );
        Ok(true)
    }

    async fn set_record_page_model(&self, enabled: bool) -> Result<(), HostError> {
        self.lock().logging.model_is_logging = enabled;
        Ok(())
    }

    async fn set_record_request_queue(&self, enabled: bool) -> Result<(), HostError> {
        self.lock().logging.queue_is_logging = enabled;
        Ok(())
    }

    async fn set_record_prefetch_service(&self, enabled: bool) -> Result<(), HostError> {
        self.lock().logging.prefetch_is_logging = enabled;
        Ok(())
    }

    async fn set_limitless_prefetching_enabled(&self, enabled: bool) -> Result<(), HostError> {
        self.lock().limitless_prefetching = enabled;
        Ok(())
    }

    async fn schedule_nwake(&self) -> Result<String, HostError> {
        let mut data = self.lock();
        data.nwake_scheduled = true;
        self.log_line(&mut data, Subsystem::Prefetch, "NWake scheduled".to_string());
        Ok("Scheduled.".to_string())
    }

    async fn cancel_nwake(&self) -> Result<String, HostError> {
        let mut data = self.lock();
        if !data.nwake_scheduled {
            return Err(HostError::failed("No NWake is scheduled"));
        }
        data.nwake_scheduled = false;
        self.log_line(&mut data, Subsystem::Prefetch, "NWake cancelled".to_string());
        Ok("Cancelled.".to_string())
    }

    async fn show_prefetch_notification(&self) -> Result<String, HostError> {
        let mut data = self.lock();
        self.log_line(
            &mut data,
            Subsystem::Prefetch,
            "Notification shown".to_string(),
        );
        Ok("Notification shown.".to_string())
    }

    async fn generate_page_bundle(&self, urls: &str) -> Result<String, HostError> {
        let urls: Vec<String> = urls
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if urls.is_empty() {
            return Err(HostError::failed("No URLs to bundle"));
        }
        let mut data = self.lock();
        let name = format!("operations/bundle-{}", data.operations.len() + 1);
        let count = urls.len();
        data.operations.insert(name.clone(), urls);
        self.log_line(
            &mut data,
            Subsystem::Prefetch,
            format!("Requested bundle {name} for {count} URL(s)"),
        );
        Ok(format!("Requested bundle for {count} URL(s); operation {name}"))
    }

    async fn get_operation(&self, name: &str) -> Result<String, HostError> {
        let data = self.lock();
        match data.operations.get(name) {
            Some(urls) => Ok(format!(
                "Operation {name} is done: {} page(s) ready",
                urls.len()
            )),
            None => Err(HostError::failed(format!("Unknown operation: {name}"))),
        }
    }

    async fn download_archive(&self, name: &str) -> Result<(), HostError> {
        if name.trim().is_empty() {
            return Err(HostError::failed("Archive name is required"));
        }
        let mut data = self.lock();
        self.log_line(
            &mut data,
            Subsystem::Prefetch,
            format!("Downloading archive {name}"),
        );
        Ok(())
    }
}
