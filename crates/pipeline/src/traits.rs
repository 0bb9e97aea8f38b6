//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible row filters to be applied to the dataset.

use data_loader::MovieRecord;
use rayon::prelude::*;

/// Core trait for selecting dataset rows.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets `apply` evaluate the predicate on rayon's pool
/// - Filters borrow rows from the dataset; nothing is cloned until the
///   query engine projects the survivors
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a single row passes this filter
    fn matches(&self, record: &MovieRecord) -> bool;

    /// Apply this filter to a set of rows, keeping their relative order.
    fn apply<'a>(&self, rows: Vec<&'a MovieRecord>) -> Vec<&'a MovieRecord> {
        rows.into_par_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}
