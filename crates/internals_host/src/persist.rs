use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::memory::Clock;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("dump directory missing or not writable: {0}")]
    DumpDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the dump directory exists; create if missing.
pub fn ensure_dump_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::DumpDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::DumpDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::DumpDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes page dumps into a directory, one timestamped file per dump.
///
/// Each file is written to a temp file first and then renamed into place, so
/// a reader never sees a half-written dump.
pub struct DumpWriter {
    dir: PathBuf,
    clock: Clock,
}

impl DumpWriter {
    pub fn new(dir: PathBuf, clock: Clock) -> Self {
        Self { dir, clock }
    }

    /// `offline_internals_<UTC timestamp>.json` for the current clock reading.
    pub fn file_name(&self) -> String {
        let stamp = DateTime::<Utc>::from_timestamp_millis((self.clock)())
            .map(|at| at.format("%Y%m%dT%H%M%S%3fZ").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!("offline_internals_{stamp}.json")
    }

    pub fn write(&self, contents: &str) -> Result<PathBuf, PersistError> {
        ensure_dump_dir(&self.dir)?;

        let target = self.dir.join(self.file_name());
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Two dumps in the same millisecond share a name; the newer one wins.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
