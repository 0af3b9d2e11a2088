//! Dataset store — the process-wide grants snapshot.
//!
//! The snapshot is loaded lazily, at most once, and never mutated after.
//! Concurrent first callers wait on a single load. A load that comes back
//! empty is not cached, so the next caller tries again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use super::{DatasetUnavailable, GrantsDataset, loader};

#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    snapshot: OnceCell<Arc<GrantsDataset>>,
}

impl DatasetStore {
    /// Create a store that loads from `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: OnceCell::new(),
        }
    }

    /// Create a store already holding `dataset`.
    ///
    /// An empty dataset leaves the store unloaded.
    pub fn preloaded(path: impl Into<PathBuf>, dataset: GrantsDataset) -> Self {
        let snapshot = if dataset.is_empty() {
            OnceCell::new()
        } else {
            OnceCell::new_with(Some(Arc::new(dataset)))
        };
        Self {
            path: path.into(),
            snapshot,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot is held. Never triggers a load.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.initialized()
    }

    /// Return the snapshot, loading it first if none is held.
    pub async fn get(&self) -> Result<Arc<GrantsDataset>, DatasetUnavailable> {
        let path = &self.path;
        self.snapshot
            .get_or_try_init(|| async move {
                debug!(path = %path.display(), "grants snapshot not loaded, loading");
                let dataset = loader::load(path).await;
                if dataset.is_empty() {
                    Err(DatasetUnavailable { path: path.clone() })
                } else {
                    Ok(Arc::new(dataset))
                }
            })
            .await
            .cloned()
    }
}
