//! What the user asked for: one axis and one parameter.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{ColumnMatchFilter, MinimumRatingFilter};
use anyhow::{Result, anyhow, bail};
use data_loader::TextColumn;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The dimension a single interaction filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Rating,
    Genre,
    Cast,
    Language,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Rating, Axis::Genre, Axis::Cast, Axis::Language];

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Rating => "rating",
            Axis::Genre => "genre",
            Axis::Cast => "cast",
            Axis::Language => "language",
        }
    }

    /// The categorical column behind a picker axis; `None` for the slider
    pub fn column(self) -> Option<TextColumn> {
        match self {
            Axis::Rating => None,
            Axis::Genre => Some(TextColumn::Genre),
            Axis::Cast => Some(TextColumn::CastMember),
            Axis::Language => Some(TextColumn::Language),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" | "ratings" => Ok(Axis::Rating),
            "genre" | "genres" => Ok(Axis::Genre),
            "cast" | "actor" => Ok(Axis::Cast),
            "language" => Ok(Axis::Language),
            other => Err(anyhow!(
                "unknown filter axis `{}` (expected rating, genre, cast or language)",
                other
            )),
        }
    }
}

/// Which selector is active. Starts out as `None` until the user picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    None,
    Selected(Axis),
}

impl ActiveFilter {
    pub fn axis(self) -> Option<Axis> {
        match self {
            ActiveFilter::None => None,
            ActiveFilter::Selected(axis) => Some(axis),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.axis().map_or("none", Axis::as_str)
    }
}

impl From<Option<Axis>> for ActiveFilter {
    fn from(axis: Option<Axis>) -> Self {
        axis.map_or(ActiveFilter::None, ActiveFilter::Selected)
    }
}

/// A single-axis query. The top-N, dedup-by-title policy is applied by
/// the query engine regardless of axis.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterRequest {
    MinimumRating(f64),
    Genre(String),
    CastMember(String),
    Language(String),
}

impl FilterRequest {
    /// Build a request from an axis and the raw parameter text.
    ///
    /// The rating parameter must be a finite number; picker values are
    /// taken verbatim (no trimming, matching is exact).
    pub fn from_axis(axis: Axis, value: &str) -> Result<Self> {
        Ok(match axis {
            Axis::Rating => {
                let threshold: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("invalid minimum rating `{}`", value))?;
                if !threshold.is_finite() {
                    bail!("invalid minimum rating `{}`", value);
                }
                FilterRequest::MinimumRating(threshold)
            }
            Axis::Genre => FilterRequest::Genre(value.to_string()),
            Axis::Cast => FilterRequest::CastMember(value.to_string()),
            Axis::Language => FilterRequest::Language(value.to_string()),
        })
    }

    pub fn axis(&self) -> Axis {
        match self {
            FilterRequest::MinimumRating(_) => Axis::Rating,
            FilterRequest::Genre(_) => Axis::Genre,
            FilterRequest::CastMember(_) => Axis::Cast,
            FilterRequest::Language(_) => Axis::Language,
        }
    }

    /// The single-filter pipeline that selects rows for this request
    pub fn to_pipeline(&self) -> FilterPipeline {
        let pipeline = FilterPipeline::new();
        match self {
            FilterRequest::MinimumRating(threshold) => {
                pipeline.add_filter(MinimumRatingFilter::new(*threshold))
            }
            FilterRequest::Genre(genre) => pipeline.add_filter(ColumnMatchFilter::genre(genre.as_str())),
            FilterRequest::CastMember(name) => {
                pipeline.add_filter(ColumnMatchFilter::cast_member(name.as_str()))
            }
            FilterRequest::Language(language) => {
                pipeline.add_filter(ColumnMatchFilter::language(language.as_str()))
            }
        }
    }
}

impl fmt::Display for FilterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRequest::MinimumRating(threshold) => write!(f, "rating >= {}", threshold),
            FilterRequest::Genre(genre) => write!(f, "genre = {}", genre),
            FilterRequest::CastMember(name) => write!(f, "cast = {}", name),
            FilterRequest::Language(language) => write!(f, "language = {}", language),
        }
    }
}
