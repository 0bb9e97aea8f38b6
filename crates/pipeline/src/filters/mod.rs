//! Filter implementations for the query pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod column_match;
pub mod minimum_rating;

// Re-export for convenience
pub use column_match::ColumnMatchFilter;
pub use minimum_rating::{MinimumRatingFilter, RATING_SLIDER, RatingSlider};
