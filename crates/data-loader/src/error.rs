//! Error types for the data-loader crate.
//!
//! Every variant is fatal for the session: without a dataset no query can
//! run, so callers surface the message and stop.

use thiserror::Error;

/// Errors that can occur while fetching and parsing the movie dataset
#[derive(Error, Debug)]
pub enum LoadError {
    /// The HTTP request for the remote CSV failed before a response arrived
    #[error("Failed to fetch dataset from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status
    #[error("Dataset request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A local dataset file could not be read
    #[error("Failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a well-formed CSV table, or a cell has the wrong type
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Dataset is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    /// The blocking parse task died before producing a result
    #[error("Dataset parse task failed: {0}")]
    Task(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;
