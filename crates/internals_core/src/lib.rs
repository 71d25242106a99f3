//! Offline internals core: pure page controller state machine and view-model helpers.
mod barrier;
mod date;
mod dump;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use barrier::CompletionBarrier;
pub use date::{format_timestamp, reformat_date_string, INVALID_DATE};
pub use dump::{dump_as_json, humanize_times};
pub use effect::Effect;
pub use model::{ItemId, LoggingState, OfflinePage, SavePageRequest, TimestampMs};
pub use msg::{ActionFailure, Msg};
pub use state::{AppState, BatchId, DirtySections};
pub use update::{update, COPIED_TO_CLIPBOARD};
pub use view_model::{
    size_in_kib, wrap_url, AppViewModel, DumpView, RequestRow, StoredPageRow,
    MAX_URL_CHARS_PER_LINE, URL_LINE_BREAK,
};
