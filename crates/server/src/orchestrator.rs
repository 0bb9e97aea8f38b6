//! # Recommendation Orchestrator
//!
//! This module coordinates one browsing interaction:
//! 1. Turn the selected axis and parameter into a FilterRequest
//! 2. Run the query engine over the shared dataset
//! 3. Resolve a poster for each returned title, one at a time
//! 4. Return the enriched list, best rated first

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use data_loader::{Dataset, DatasetCache, TextColumn};
use pipeline::filters::{RATING_SLIDER, RatingSlider};
use pipeline::{ActiveFilter, Axis, FilterRequest, MovieRow, QueryEngine};
use poster_client::{OmdbClient, PosterLookup, PosterResolver};

use crate::config::AppConfig;

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub title: String,
    pub rating: Option<f64>,
    pub genre: Option<String>,
    pub poster_url: String,
}

/// What the parameter control for an axis offers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AxisOptions {
    Slider(RatingSlider),
    Picker { values: Vec<String> },
}

/// Main orchestrator that ties the dataset, query engine and posters together
pub struct RecommendationOrchestrator<L> {
    dataset: Arc<Dataset>,
    posters: Arc<PosterResolver<L>>,
    engine: QueryEngine,
}

impl<L> Clone for RecommendationOrchestrator<L> {
    fn clone(&self) -> Self {
        Self {
            dataset: Arc::clone(&self.dataset),
            posters: Arc::clone(&self.posters),
            engine: self.engine,
        }
    }
}

impl RecommendationOrchestrator<OmdbClient> {
    /// Load the dataset and build the OMDb-backed resolver from config.
    ///
    /// A dataset load failure is returned as-is: nothing can be browsed
    /// without the table.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let cache = DatasetCache::new(config.dataset.clone());
        let dataset = cache
            .get()
            .await
            .context("Failed to load movie dataset")?;

        if config.omdb_api_key.is_none() {
            warn!("No OMDb API key configured; every poster will use the placeholder");
        }
        let omdb = OmdbClient::new(config.omdb_api_key.clone(), config.poster_timeout)
            .context("Failed to build OMDb client")?
            .with_base_url(config.omdb_base_url.clone());
        let posters = PosterResolver::new(omdb)
            .with_placeholder(config.placeholder_url.clone())
            .cache_failures(config.cache_failed_posters);

        Ok(Self::new(dataset, posters, config.result_limit))
    }
}

impl<L: PosterLookup> RecommendationOrchestrator<L> {
    pub fn new(dataset: Arc<Dataset>, posters: PosterResolver<L>, limit: usize) -> Self {
        Self {
            dataset,
            posters: Arc::new(posters),
            engine: QueryEngine::new(limit),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn posters(&self) -> &PosterResolver<L> {
        &self.posters
    }

    /// Ranked rows for a request, without posters
    pub fn query(&self, request: &FilterRequest) -> Vec<MovieRow> {
        self.engine.run(&self.dataset, request)
    }

    /// Main entry point: ranked rows enriched with poster URLs
    pub async fn recommend(&self, request: &FilterRequest) -> Vec<MovieRecommendation> {
        let start_time = Instant::now();

        let rows = self.query(request);
        let recommendations = self.enrich(rows).await;

        info!(
            "Served {} recommendations for [{}] in {:.2?}",
            recommendations.len(),
            request,
            start_time.elapsed()
        );
        recommendations
    }

    /// Recommendations for the current selector state.
    ///
    /// The rating slider and the genre picker always hold a value: with
    /// none given they start on the slider default and the first genre.
    /// Nothing selected, or a cast or language picker with no value chosen
    /// yet, yields an empty list.
    pub async fn browse(
        &self,
        active: ActiveFilter,
        value: Option<&str>,
    ) -> Result<Vec<MovieRecommendation>> {
        let Some(axis) = active.axis() else {
            return Ok(Vec::new());
        };

        let request = match (axis, value) {
            (_, Some(value)) => FilterRequest::from_axis(axis, value)?,
            (Axis::Rating, None) => FilterRequest::MinimumRating(RATING_SLIDER.default),
            (Axis::Genre, None) => match self.dataset.distinct_values(TextColumn::Genre).first() {
                Some(genre) => FilterRequest::Genre(genre.clone()),
                None => return Ok(Vec::new()),
            },
            (Axis::Cast | Axis::Language, None) => return Ok(Vec::new()),
        };
        Ok(self.recommend(&request).await)
    }

    /// Choices offered by an axis's parameter control
    pub fn options(&self, axis: Axis) -> AxisOptions {
        match axis.column() {
            None => AxisOptions::Slider(RATING_SLIDER),
            Some(column) => AxisOptions::Picker {
                values: self.dataset.distinct_values(column).to_vec(),
            },
        }
    }

    /// Attach a poster to every row, sequentially
    async fn enrich(&self, rows: Vec<MovieRow>) -> Vec<MovieRecommendation> {
        let mut recommendations = Vec::with_capacity(rows.len());
        for row in rows {
            let poster_url = self.posters.resolve(&row.title).await;
            recommendations.push(MovieRecommendation {
                title: row.title,
                rating: row.rating,
                genre: row.genre,
                poster_url,
            });
        }
        recommendations
    }
}
