use super::loader::{DirectoryLoader, LoadError};
use super::roster::Directory;
use crate::config::DataConfig;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
enum LoadState {
    Pending,
    Loaded(Arc<Directory>),
    Failed(Arc<LoadError>),
}

/// Lazily loaded, shared directory. A failed load is retried on the next request.
#[derive(Debug)]
pub struct DirectoryHandle {
    sources: DataConfig,
    state: RwLock<LoadState>,
}

impl DirectoryHandle {
    pub fn new(sources: DataConfig) -> Self {
        Self {
            sources,
            state: RwLock::new(LoadState::Pending),
        }
    }

    pub fn preloaded(sources: DataConfig, directory: Directory) -> Self {
        Self {
            sources,
            state: RwLock::new(LoadState::Loaded(Arc::new(directory))),
        }
    }

    /// The loaded directory, loading (or reloading after a failure) when needed.
    pub async fn current(&self) -> Result<Arc<Directory>, Arc<LoadError>> {
        if let LoadState::Loaded(directory) = &*self.state.read().await {
            return Ok(directory.clone());
        }

        let mut state = self.state.write().await;
        if let LoadState::Loaded(directory) = &*state {
            return Ok(directory.clone());
        }
        if let LoadState::Failed(previous) = &*state {
            tracing::info!(previous = %previous, "retrying directory load");
        }

        let today = Local::now().date_naive();
        match DirectoryLoader::from_paths(&self.sources.records_path, &self.sources.images_path, today)
            .await
        {
            Ok(directory) => {
                let directory = Arc::new(directory);
                *state = LoadState::Loaded(directory.clone());
                Ok(directory)
            }
            Err(err) => {
                tracing::error!(error = %err, "directory load failed");
                let err = Arc::new(err);
                *state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub async fn is_loaded(&self) -> bool {
        matches!(&*self.state.read().await, LoadState::Loaded(_))
    }
}
