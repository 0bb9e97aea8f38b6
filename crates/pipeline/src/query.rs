//! # Query Engine
//!
//! Turns a [`FilterRequest`] into the ranked result list:
//! 1. Select matching rows (single-filter pipeline)
//! 2. Project to the display columns
//! 3. Deduplicate by title, keeping the first occurrence
//! 4. Sort by rating, highest first (stable, missing ratings last)
//! 5. Truncate to the limit
//!
//! The engine is a pure function of (Dataset, FilterRequest): same inputs,
//! same output, no state.

use crate::request::FilterRequest;
use data_loader::{Dataset, MovieRecord};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::info;

/// Number of titles shown per interaction
pub const DEFAULT_RESULT_LIMIT: usize = 8;

/// The display projection of a dataset row.
///
/// Genre is carried for every axis; whether to show it is up to the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRow {
    pub title: String,
    pub rating: Option<f64>,
    pub genre: Option<String>,
}

impl From<&MovieRecord> for MovieRow {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            rating: record.rating,
            genre: record.genre.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    limit: usize,
}

impl QueryEngine {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run one query against the dataset.
    pub fn run(&self, dataset: &Dataset, request: &FilterRequest) -> Vec<MovieRow> {
        let selected = request.to_pipeline().select(dataset);
        let matched = selected.len();

        let rows = dedup_by_title(selected.into_iter().map(MovieRow::from));
        let unique = rows.len();

        let ranked = rank_and_select(rows, self.limit);
        info!(
            "Query [{}]: {} matching rows, {} distinct titles, returning {}",
            request,
            matched,
            unique,
            ranked.len()
        );
        ranked
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_LIMIT)
    }
}

/// Run a query with the default limit of eight titles
pub fn query(dataset: &Dataset, request: &FilterRequest) -> Vec<MovieRow> {
    QueryEngine::default().run(dataset, request)
}

/// Drop every row whose title was already seen, keeping the first one
fn dedup_by_title(rows: impl Iterator<Item = MovieRow>) -> Vec<MovieRow> {
    let mut seen: HashSet<String> = HashSet::new();
    rows.filter(|row| seen.insert(row.title.clone())).collect()
}

/// Sort by rating descending and keep the top `limit` rows.
///
/// `sort_by` is stable, so equal ratings keep their selection order.
fn rank_and_select(mut rows: Vec<MovieRow>, limit: usize) -> Vec<MovieRow> {
    rows.sort_by(|a, b| compare_rating_desc(a.rating, b.rating));
    rows.truncate(limit);
    rows
}

/// Best rating first. A NaN rating ranks with the missing ones, last.
fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    let known = |r: Option<f64>| r.filter(|r| !r.is_nan());
    match (known(a), known(b)) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
