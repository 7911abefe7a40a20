// Vehicle dataset: CSV loading, normalization into fully-populated records,
// and the sources handlers pull a dataset from (fresh per request or cached).

pub mod loader;
pub mod model;
pub mod source;

use std::path::PathBuf;

use thiserror::Error;

pub use loader::{load_csv, LoadReport};
pub use model::{Dataset, LabelEncoding, VehicleRecord, UNKNOWN};
pub use source::{CachedCsvSource, CsvFileSource, DatasetSource};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found at {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
