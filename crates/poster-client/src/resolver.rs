//! Title -> poster URL resolution with a process-lifetime cache.

use std::future::Future;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::error::PosterLookupError;

/// Shown whenever a real poster cannot be resolved
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/80x220?text=No+Poster";

/// A source of poster URLs keyed by movie title.
///
/// `Ok(None)` means the upstream answered and has no poster for the
/// title; `Err` means the lookup itself failed.
pub trait PosterLookup: Send + Sync {
    fn lookup_poster(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Option<String>, PosterLookupError>> + Send;
}

/// Resolves titles to poster URLs, never failing.
///
/// Every title is looked up at most once while its answer is cached.
/// Answers from the upstream (a URL, or "no poster") are always cached.
/// Failed lookups resolve to the placeholder and are only cached when
/// `cache_failures` is set; otherwise the next call retries.
pub struct PosterResolver<L> {
    lookup: L,
    cache: DashMap<String, String>,
    placeholder: String,
    cache_failures: bool,
}

impl<L: PosterLookup> PosterResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: DashMap::new(),
            placeholder: PLACEHOLDER_POSTER_URL.to_string(),
            cache_failures: false,
        }
    }

    /// Use a different fallback image
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Remember failed lookups as the placeholder instead of retrying them
    pub fn cache_failures(mut self, enabled: bool) -> Self {
        self.cache_failures = enabled;
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Poster URL for `title`; the placeholder on any failure.
    ///
    /// Cache keys are the exact, case-sensitive title.
    pub async fn resolve(&self, title: &str) -> String {
        if let Some(url) = self.cached(title) {
            debug!("Poster cache hit for {:?}", title);
            return url;
        }

        match self.lookup.lookup_poster(title).await {
            Ok(found) => {
                let url = found.unwrap_or_else(|| self.placeholder.clone());
                self.cache.insert(title.to_string(), url.clone());
                url
            }
            Err(e) => {
                warn!("Poster lookup for {:?} failed: {}", title, e);
                if self.cache_failures {
                    self.cache.insert(title.to_string(), self.placeholder.clone());
                }
                self.placeholder.clone()
            }
        }
    }

    /// The cached URL for `title`, without any lookup
    pub fn cached(&self, title: &str) -> Option<String> {
        self.cache.get(title).map(|entry| entry.value().clone())
    }

    /// Number of titles with a cached answer
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
