use crate::platform::document::ElementId;

pub const STORED_PAGES_TABLE: ElementId = ElementId::new("stored-pages");
pub const STORED_PAGES_ROW: ElementId = ElementId::new("stored-pages-table-row");
pub const REQUEST_QUEUE_TABLE: ElementId = ElementId::new("request-queue");
pub const REQUEST_QUEUE_ROW: ElementId = ElementId::new("request-queue-table-row");
pub const LOGS_LIST: ElementId = ElementId::new("logs");
pub const CURRENT_STATUS: ElementId = ElementId::new("current-status");

pub const TOGGLE_ALL_STORED: ElementId = ElementId::new("toggle-all-stored");
pub const TOGGLE_ALL_REQUESTS: ElementId = ElementId::new("toggle-all-requests");
pub const LIMITLESS_CHECKBOX: ElementId = ElementId::new("limitless-prefetching-checkbox");
pub const MODEL_CHECKBOX: ElementId = ElementId::new("model-checkbox");
pub const REQUEST_CHECKBOX: ElementId = ElementId::new("request-checkbox");
pub const PREFETCH_CHECKBOX: ElementId = ElementId::new("prefetch-checkbox");

pub const BUTTON_REFRESH: ElementId = ElementId::new("refresh");
pub const BUTTON_DELETE_PAGES: ElementId = ElementId::new("delete-selected-pages");
pub const BUTTON_DELETE_REQUESTS: ElementId = ElementId::new("delete-selected-requests");
pub const BUTTON_REFRESH_LOGS: ElementId = ElementId::new("refresh-logs");
pub const BUTTON_DUMP: ElementId = ElementId::new("dump");
pub const BUTTON_CLOSE_DUMP: ElementId = ElementId::new("close-dump");
pub const BUTTON_COPY: ElementId = ElementId::new("copy-to-clipboard");
pub const BUTTON_SAVE_DUMP: ElementId = ElementId::new("save-dump");
pub const BUTTON_ADD_TO_QUEUE: ElementId = ElementId::new("add-to-queue");
pub const BUTTON_SCHEDULE_NWAKE: ElementId = ElementId::new("schedule-nwake");
pub const BUTTON_CANCEL_NWAKE: ElementId = ElementId::new("cancel-nwake");
pub const BUTTON_SHOW_NOTIFICATION: ElementId = ElementId::new("show-notification");
pub const BUTTON_GENERATE_PAGE_BUNDLE: ElementId = ElementId::new("generate-page-bundle");
pub const BUTTON_GET_OPERATION: ElementId = ElementId::new("get-operation");
pub const BUTTON_DOWNLOAD_ARCHIVE: ElementId = ElementId::new("download-archive");

pub const INPUT_URL: ElementId = ElementId::new("url");
pub const INPUT_GENERATE_URLS: ElementId = ElementId::new("generate-urls");
pub const INPUT_OPERATION_NAME: ElementId = ElementId::new("operation-name");
pub const INPUT_DOWNLOAD_NAME: ElementId = ElementId::new("download-name");

pub const PAGE_ACTIONS_INFO: ElementId = ElementId::new("page-actions-info");
pub const REQUEST_QUEUE_ACTIONS_INFO: ElementId = ElementId::new("request-queue-actions-info");
pub const SAVE_URL_STATE: ElementId = ElementId::new("save-url-state");
pub const PREFETCH_ACTIONS_INFO: ElementId = ElementId::new("prefetch-actions-info");

pub const DUMP_MODAL: ElementId = ElementId::new("dump-modal");
pub const DUMP_BOX: ElementId = ElementId::new("dump-box");
pub const DUMP_INFO: ElementId = ElementId::new("dump-info");

/// Checkbox group of the stored pages table.
pub const STORED_GROUP: &str = "stored";
/// Checkbox group of the request queue table.
pub const REQUESTS_GROUP: &str = "requests";

/// Controls that mutate offline state; disabled in incognito sessions.
pub const INCOGNITO_DISABLED: [ElementId; 5] = [
    BUTTON_DELETE_PAGES,
    BUTTON_DELETE_REQUESTS,
    MODEL_CHECKBOX,
    REQUEST_CHECKBOX,
    BUTTON_REFRESH,
];
