//! Core domain types for the movie dataset.
//!
//! The dataset is a flat table: one row per (title, cast member) pair, so
//! the same title can appear many times. There is no identifier other than
//! the title itself.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// =============================================================================
// Column names
// =============================================================================
// The remote CSV is consumed as-is; a renamed column is a breaking failure.

pub const TITLE_COLUMN: &str = "primaryTitle";
pub const RATING_COLUMN: &str = "averageRating";
pub const GENRE_COLUMN: &str = "genres";
pub const CAST_COLUMN: &str = "primaryName";
pub const LANGUAGE_COLUMN: &str = "language_name";

/// Every column the loader requires, in export header order
pub const REQUIRED_COLUMNS: [&str; 5] = [
    TITLE_COLUMN,
    RATING_COLUMN,
    GENRE_COLUMN,
    CAST_COLUMN,
    LANGUAGE_COLUMN,
];

// =============================================================================
// MovieRecord
// =============================================================================

/// Cell spellings the export uses for "no value", on top of the empty cell
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// A rating cell: missing markers and NaN are `None`, anything else must
/// parse as a number.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(cell) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let cell = cell.trim();
    if is_missing(cell) {
        return Ok(None);
    }
    let rating: f64 = cell
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid rating `{}`", cell)))?;
    Ok(Some(rating).filter(|r| !r.is_nan()))
}

/// A categorical cell: missing markers are `None`, the rest is kept verbatim
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(deserializer)?;
    Ok(cell.filter(|value| !is_missing(value)))
}

/// One row of the dataset.
///
/// Optional fields are `None` when the CSV cell is empty or holds one of
/// the `MISSING_MARKERS`. A record with a
/// missing value never matches a filter on that column and never shows up
/// in a picker enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "primaryTitle", default)]
    pub title: String,
    /// Average rating, 0-10 in practice
    #[serde(rename = "averageRating", default, deserialize_with = "deserialize_rating")]
    pub rating: Option<f64>,
    /// A single genre string, even though real movies carry several
    #[serde(rename = "genres", default, deserialize_with = "deserialize_text")]
    pub genre: Option<String>,
    #[serde(rename = "primaryName", default, deserialize_with = "deserialize_text")]
    pub cast_member: Option<String>,
    #[serde(rename = "language_name", default, deserialize_with = "deserialize_text")]
    pub language: Option<String>,
}

impl MovieRecord {
    /// Build a fully populated record (handy for tests and demos)
    pub fn new(
        title: impl Into<String>,
        rating: f64,
        genre: impl Into<String>,
        cast_member: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            rating: Some(rating),
            genre: Some(genre.into()),
            cast_member: Some(cast_member.into()),
            language: Some(language.into()),
        }
    }
}

// =============================================================================
// TextColumn
// =============================================================================

/// The categorical columns a user can pick a value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextColumn {
    Genre,
    CastMember,
    Language,
}

impl TextColumn {
    pub const ALL: [TextColumn; 3] = [TextColumn::Genre, TextColumn::CastMember, TextColumn::Language];

    /// Header name in the source CSV
    pub fn header(self) -> &'static str {
        match self {
            TextColumn::Genre => GENRE_COLUMN,
            TextColumn::CastMember => CAST_COLUMN,
            TextColumn::Language => LANGUAGE_COLUMN,
        }
    }

    /// Borrow this column's value out of a record
    pub fn value_of(self, record: &MovieRecord) -> Option<&str> {
        match self {
            TextColumn::Genre => record.genre.as_deref(),
            TextColumn::CastMember => record.cast_member.as_deref(),
            TextColumn::Language => record.language.as_deref(),
        }
    }
}

// =============================================================================
// Dataset - The In-Memory Table
// =============================================================================

/// The whole movie table, held in memory and immutable once built.
///
/// All fields are private and there are no `&mut self` methods: queries
/// are read-only views, and the value is shared as `Arc<Dataset>`.
#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) records: Vec<MovieRecord>,
    /// Sorted distinct non-missing values per categorical column
    pub(crate) options: HashMap<TextColumn, Vec<String>>,
}

impl Dataset {
    /// All rows in source order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Picker options for a column: distinct, sorted, missing values excluded.
    ///
    /// Returns an empty slice for an empty dataset.
    pub fn distinct_values(&self, column: TextColumn) -> &[String] {
        self.options
            .get(&column)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Highest known rating, if any row has one
    pub fn max_rating(&self) -> Option<f64> {
        self.records
            .iter()
            .filter_map(|r| r.rating)
            .max_by(|a, b| a.total_cmp(b))
    }
}
