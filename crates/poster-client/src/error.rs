use thiserror::Error;

/// Errors that can occur when looking up a poster.
///
/// None of these ever reach the user: the resolver logs them and falls
/// back to the placeholder image.
#[derive(Error, Debug)]
pub enum PosterLookupError {
    #[error("No OMDb API key configured")]
    MissingApiKey,

    /// Connection failure, timeout, or an unreadable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OMDb returned HTTP {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("Invalid OMDb response at `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
