//! Fetching the dataset and holding it for the process lifetime.
//!
//! The table is loaded at most once per `DatasetCache`. A failed load is
//! not remembered, so the next `get` tries again; there is never a partial
//! table.

use crate::error::{LoadError, Result};
use crate::parser;
use crate::types::Dataset;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::info;

/// Google Drive export of the movie table the app was built around
pub const DEFAULT_DATASET_URL: &str =
    "https://drive.google.com/uc?export=download&id=1ErVPn402X-xHzsfswvqU0uEggDZKAk6k";

/// Where the CSV comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// One HTTP GET to a fixed URL
    Remote(String),
    /// A local copy of the same CSV
    File(PathBuf),
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Remote(DEFAULT_DATASET_URL.to_string())
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Remote(url) => write!(f, "{}", url),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch and parse the dataset once, without caching.
pub async fn load(source: &DatasetSource) -> Result<Dataset> {
    info!("Loading movie dataset from {}", source);
    let start = Instant::now();

    let bytes = match source {
        DatasetSource::Remote(url) => fetch_remote(url).await?,
        DatasetSource::File(path) => tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?,
    };

    // CSV parsing and index building are CPU-bound
    let dataset = tokio::task::spawn_blocking(move || {
        parser::parse_bytes(&bytes).map(Dataset::from_records)
    })
    .await
    .map_err(|e| LoadError::Task(e.to_string()))??;

    info!(
        "Loaded {} rows in {:.2?}",
        dataset.len(),
        start.elapsed()
    );
    Ok(dataset)
}

async fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let http_error = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(http_error)?;
    Ok(body.to_vec())
}

/// Process-lifetime cache around [`load`].
///
/// Every caller gets the same `Arc<Dataset>`; the table is only re-fetched
/// after [`DatasetCache::invalidate`].
#[derive(Debug)]
pub struct DatasetCache {
    source: DatasetSource,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already built dataset (no fetch will ever happen)
    pub fn preloaded(source: DatasetSource, dataset: Dataset) -> Self {
        Self {
            source,
            cell: OnceCell::new_with(Some(Arc::new(dataset))),
        }
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Return the cached dataset, loading it on first use.
    pub async fn get(&self) -> Result<Arc<Dataset>> {
        let dataset = self
            .cell
            .get_or_try_init(|| async { load(&self.source).await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(dataset))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Drop the cached table so the next `get` fetches again
    pub fn invalidate(&mut self) {
        if self.cell.take().is_some() {
            info!("Invalidated cached dataset from {}", self.source);
        }
    }
}
