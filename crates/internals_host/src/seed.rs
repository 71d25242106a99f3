use std::fs;
use std::io;
use std::path::Path;

use internals_core::{LoggingState, OfflinePage, SavePageRequest};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("io error reading seed {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid seed {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Initial contents of the in-memory host, read from a JSON file shaped like
/// a page dump with a few extra host fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostSeed {
    pub offline_pages: Vec<OfflinePage>,
    pub save_page_requests: Vec<SavePageRequest>,
    pub network_status: String,
    pub limitless_prefetching_enabled: bool,
    pub event_logs: Vec<String>,
    pub logging_state: LoggingState,
}

impl Default for HostSeed {
    fn default() -> Self {
        Self {
            offline_pages: Vec::new(),
            save_page_requests: Vec::new(),
            network_status: "Connected".to_string(),
            limitless_prefetching_enabled: false,
            event_logs: Vec::new(),
            logging_state: LoggingState::default(),
        }
    }
}

impl HostSeed {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| SeedError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
