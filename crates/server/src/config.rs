//! Runtime configuration shared by the CLI and the HTTP API.

use std::net::SocketAddr;
use std::time::Duration;

use data_loader::DatasetSource;
use pipeline::DEFAULT_RESULT_LIMIT;
use poster_client::{DEFAULT_LOOKUP_TIMEOUT, OMDB_BASE_URL, PLACEHOLDER_POSTER_URL};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the movie CSV is loaded from
    pub dataset: DatasetSource,
    pub omdb_base_url: String,
    /// Without a key every poster resolves to the placeholder
    pub omdb_api_key: Option<String>,
    pub poster_timeout: Duration,
    pub placeholder_url: String,
    /// Titles shown per query
    pub result_limit: usize,
    /// Remember failed poster lookups instead of retrying them
    pub cache_failed_posters: bool,
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::default(),
            omdb_base_url: OMDB_BASE_URL.to_string(),
            omdb_api_key: None,
            poster_timeout: DEFAULT_LOOKUP_TIMEOUT,
            placeholder_url: PLACEHOLDER_POSTER_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            cache_failed_posters: false,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}
