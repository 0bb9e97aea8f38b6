use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::PosterLookupError;
use crate::resolver::PosterLookup;

pub const OMDB_BASE_URL: &str = "http://www.omdbapi.com/";

/// Upper bound for a single title lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Sentinel OMDb uses in place of a missing poster
const NOT_AVAILABLE: &str = "N/A";

/// The subset of an OMDb title response we read.
#[derive(Debug, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    /// "True" or "False"
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbTitle {
    /// The poster URL, if OMDb found the title and has a real one.
    ///
    /// An unsuccessful response, a missing or empty field and the "N/A"
    /// sentinel all mean "no poster".
    pub fn poster_url(&self) -> Option<&str> {
        if self.response.as_deref() == Some("False") {
            return None;
        }
        self.poster
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != NOT_AVAILABLE)
    }
}

/// Client for the OMDb title-search API.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    /// Create a client with its own reqwest `Client` and request timeout.
    pub fn new(api_key: Option<String>, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, OMDB_BASE_URL, api_key))
    }

    /// Create a client around an existing reqwest `Client` (and base URL,
    /// so tests can point it at a local server).
    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Point the client at a different OMDb-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up a title by exact name (`?t=`).
    pub async fn fetch_title(&self, title: &str) -> crate::Result<OmdbTitle> {
        let api_key = self.api_key.as_deref().ok_or(PosterLookupError::MissingApiKey)?;

        debug!("Looking up poster for {:?}", title);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", api_key)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PosterLookupError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| PosterLookupError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

impl PosterLookup for OmdbClient {
    fn lookup_poster(
        &self,
        title: &str,
    ) -> impl Future<Output = crate::Result<Option<String>>> + Send {
        async move {
            let found = self.fetch_title(title).await?;
            Ok(found.poster_url().map(str::to_owned))
        }
    }
}
