use std::sync::Arc;

use crate::config::Config;
use crate::dataset::{CachedCsvSource, CsvFileSource, Dataset, DatasetSource};
use crate::errors::AppError;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable dataset source. Default: CsvFileSource. Swap via DATASET_CACHE env.
    pub dataset: Arc<dyn DatasetSource>,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let dataset: Arc<dyn DatasetSource> = if config.dataset_cache {
            Arc::new(CachedCsvSource::new(config.dataset_path.clone()))
        } else {
            Arc::new(CsvFileSource::new(config.dataset_path.clone()))
        };
        AppState { config, dataset }
    }

    /// Loads the dataset and runs `work` on it, both inside `spawn_blocking`
    /// so CSV parsing and scoring never block the async executor.
    pub async fn with_dataset<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: FnOnce(&Dataset) -> T + Send + 'static,
        T: Send + 'static,
    {
        let source = Arc::clone(&self.dataset);
        let output = tokio::task::spawn_blocking(move || source.load().map(|d| work(d.as_ref())))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed loading dataset: {e}"))
            })??;
        Ok(output)
    }
}
