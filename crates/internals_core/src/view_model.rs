use crate::date::format_timestamp;
use crate::{ItemId, LoggingState, OfflinePage, SavePageRequest};

/// Longest URL shown on a single line in the stored pages table.
pub const MAX_URL_CHARS_PER_LINE: usize = 50;

/// Line break inserted between wrapped URL chunks.
pub const URL_LINE_BREAK: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stored_pages: Vec<StoredPageRow>,
    pub request_queue: Vec<RequestRow>,
    pub network_status: String,
    pub limitless_prefetching: bool,
    pub event_logs: Vec<String>,
    pub logging_state: LoggingState,
    pub page_actions_info: String,
    pub request_queue_actions_info: String,
    pub save_url_state: String,
    pub prefetch_actions_info: String,
    /// Present while the dump modal is open.
    pub dump: Option<DumpView>,
    /// Mutating controls are disabled in incognito sessions.
    pub controls_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPageRow {
    /// 1-based position in the table.
    pub index: usize,
    pub id: ItemId,
    pub href: String,
    pub link_text: String,
    pub namespace: String,
    pub size_kib: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    pub id: ItemId,
    pub online_url: String,
    pub created: String,
    pub status: String,
    pub request_origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpView {
    pub text: String,
    pub info: String,
}

pub(crate) fn stored_page_row(index: usize, page: &OfflinePage) -> StoredPageRow {
    StoredPageRow {
        index: index + 1,
        id: page.id.clone(),
        href: page.online_url.clone(),
        link_text: wrap_url(&page.online_url),
        namespace: page.namespace.clone(),
        size_kib: size_in_kib(page.size),
    }
}

pub(crate) fn request_row(request: &SavePageRequest) -> RequestRow {
    RequestRow {
        id: request.id.clone(),
        online_url: request.online_url.clone(),
        created: format_timestamp(request.creation_time),
        status: request.status.clone(),
        request_origin: request.request_origin.clone(),
    }
}

/// Hard-wraps a URL into lines of at most [`MAX_URL_CHARS_PER_LINE`] UTF-16
/// code units, the unit the page measures string length in. A character
/// outside the BMP that would straddle a break starts the next line instead.
/// URLs that fit on one line are returned unchanged.
pub fn wrap_url(url: &str) -> String {
    if url.encode_utf16().count() <= MAX_URL_CHARS_PER_LINE {
        return url.to_string();
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut units = 0;
    for c in url.chars() {
        if units + c.len_utf16() > MAX_URL_CHARS_PER_LINE {
            lines.push(std::mem::take(&mut line));
            units = 0;
        }
        line.push(c);
        units += c.len_utf16();
    }
    lines.push(line);
    lines.join(URL_LINE_BREAK)
}

/// Size in KiB, rounded half up.
pub fn size_in_kib(bytes: u64) -> u64 {
    bytes / 1024 + u64::from(bytes % 1024 >= 512)
}
