//! Poster lookup for movie titles.
//!
//! This crate turns a movie title into an image URL. It handles:
//! - Calling the OMDb title-search API with a bounded timeout
//! - Normalizing missing posters (empty field, "N/A", title not found)
//! - Caching answers per title for the life of the process
//! - Falling back to a placeholder image on any failure

mod error;
pub mod omdb;
pub mod resolver;

pub use error::PosterLookupError;
pub use omdb::{OmdbClient, OmdbTitle, DEFAULT_LOOKUP_TIMEOUT, OMDB_BASE_URL};
pub use resolver::{PosterLookup, PosterResolver, PLACEHOLDER_POSTER_URL};

pub type Result<T> = std::result::Result<T, PosterLookupError>;
