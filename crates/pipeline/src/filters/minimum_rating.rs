//! Filter to enforce a minimum rating threshold.
//!
//! Keeps rows whose rating is at least the chosen threshold. Rows with no
//! rating never pass.

use crate::traits::Filter;
use data_loader::MovieRecord;
use serde::Serialize;

/// Bounds of the rating slider offered to users
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSlider {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// The slider the browser has always shown: 1.0 to 8.0, starting at 5.0.
///
/// The engine itself accepts any threshold; a value above the best rating
/// in the dataset simply matches nothing.
pub const RATING_SLIDER: RatingSlider = RatingSlider {
    min: 1.0,
    max: 8.0,
    default: 5.0,
};

/// Removes rows rated below `min_rating` (inclusive bound).
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn matches(&self, record: &MovieRecord) -> bool {
        record.rating.is_some_and(|rating| rating >= self.min_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(title: &str, rating: Option<f64>) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            rating,
            genre: None,
            cast_member: None,
            language: None,
        }
    }

    #[test]
    fn test_minimum_rating_filter() {
        let rows = vec![
            rated("High", Some(8.8)),
            rated("Exact", Some(7.0)),
            rated("Low", Some(6.9)),
            rated("Unrated", None),
        ];

        let filter = MinimumRatingFilter::new(7.0);
        let filtered = filter.apply(rows.iter().collect());

        // Threshold is inclusive; missing ratings are dropped
        let titles: Vec<_> = filtered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["High", "Exact"]);
    }

    #[test]
    fn test_threshold_above_every_rating_matches_nothing() {
        let rows = vec![rated("A", Some(7.9)), rated("B", Some(6.0))];

        let filtered = MinimumRatingFilter::new(8.0).apply(rows.iter().collect());

        assert!(filtered.is_empty());
    }

    #[test]
    fn test_slider_default_within_bounds() {
        assert!(RATING_SLIDER.min <= RATING_SLIDER.default);
        assert!(RATING_SLIDER.default <= RATING_SLIDER.max);
    }
}
