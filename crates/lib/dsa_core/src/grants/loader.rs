//! Dataset loader — reads the grants JSON file from disk.

use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tracing::{error, info, warn};

use super::GrantsDataset;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "../db.json";

#[derive(Debug, Error)]
enum LoadError {
    #[error("file not found")]
    NotFound,

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

async fn read_dataset(path: &Path) -> Result<GrantsDataset, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(e),
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Load the dataset at `path`.
///
/// Never fails: a missing, unreadable, or malformed file yields an empty
/// dataset and a log line.
pub async fn load(path: &Path) -> GrantsDataset {
    match read_dataset(path).await {
        Ok(dataset) => {
            info!(
                path = %path.display(),
                granter_grants = dataset.granter_grants().len(),
                grantee_grants = dataset.grantee_grants().len(),
                "grants data loaded"
            );
            dataset
        }
        Err(LoadError::NotFound) => {
            warn!(path = %path.display(), "grants dataset file not found");
            GrantsDataset::default()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "error loading grants data");
            GrantsDataset::default()
        }
    }
}
