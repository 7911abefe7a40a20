//! Dataset sources — where handlers get a `Dataset` from.
//!
//! `AppState` holds an `Arc<dyn DatasetSource>`, chosen at startup via config:
//! - `CsvFileSource` reloads the file on every call (no shared state)
//! - `CachedCsvSource` keeps the last parse and reloads when the file's
//!   modification time or length changes

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use tracing::{debug, info};

use super::loader::load_csv;
use super::model::Dataset;
use super::DatasetError;

/// Blocking by contract; call from `spawn_blocking` inside async handlers.
pub trait DatasetSource: Send + Sync {
    fn load(&self) -> Result<Arc<Dataset>, DatasetError>;
}

pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvFileSource {
    fn load(&self) -> Result<Arc<Dataset>, DatasetError> {
        let (dataset, _report) = load_csv(&self.path)?;
        Ok(Arc::new(dataset))
    }
}

/// Identity of the file contents as far as metadata can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

struct CacheEntry {
    stamp: FileStamp,
    dataset: Arc<Dataset>,
}

pub struct CachedCsvSource {
    path: PathBuf,
    cache: Mutex<Option<CacheEntry>>,
}

impl CachedCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }
}

impl DatasetSource for CachedCsvSource {
    fn load(&self) -> Result<Arc<Dataset>, DatasetError> {
        let stamp = file_stamp(&self.path)?;

        // A poisoned lock only means a previous load panicked; the cache slot is still usable.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = cache.as_ref() {
            if entry.stamp == stamp {
                debug!("Serving cached dataset ({} rows)", entry.dataset.len());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let (dataset, report) = load_csv(&self.path)?;
        let dataset = Arc::new(dataset);
        info!(
            "Dataset (re)loaded from {}: {} rows",
            self.path.display(),
            report.rows
        );
        *cache = Some(CacheEntry {
            stamp,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }
}

fn file_stamp(path: &Path) -> Result<FileStamp, DatasetError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(FileStamp {
            modified: meta.modified()?,
            len: meta.len(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DatasetError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(DatasetError::Io(e)),
    }
}
