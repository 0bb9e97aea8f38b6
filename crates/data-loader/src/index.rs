//! Dataset building and indexing logic.
//!
//! Rows are kept exactly as parsed. The only secondary index is the set of
//! picker options per categorical column, computed once here so every
//! request reads it instead of rescanning the table.

use crate::types::*;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

impl Dataset {
    /// Build the immutable dataset from parsed rows.
    ///
    /// Steps:
    /// 1. Keep the rows in source order
    /// 2. Compute the distinct, sorted, non-missing values of each
    ///    categorical column (three columns in parallel)
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let options = build_options(&records);
        debug!(
            "Built dataset index: {} rows, {} genres, {} cast members, {} languages",
            records.len(),
            options.get(&TextColumn::Genre).map_or(0, Vec::len),
            options.get(&TextColumn::CastMember).map_or(0, Vec::len),
            options.get(&TextColumn::Language).map_or(0, Vec::len),
        );
        Self { records, options }
    }
}

fn build_options(records: &[MovieRecord]) -> HashMap<TextColumn, Vec<String>> {
    // Nested joins give three-way parallelism, one column per task
    let ((genres, cast), languages) = rayon::join(
        || {
            rayon::join(
                || distinct_sorted(records, TextColumn::Genre),
                || distinct_sorted(records, TextColumn::CastMember),
            )
        },
        || distinct_sorted(records, TextColumn::Language),
    );

    HashMap::from([
        (TextColumn::Genre, genres),
        (TextColumn::CastMember, cast),
        (TextColumn::Language, languages),
    ])
}

/// Distinct non-missing values of one column, sorted lexicographically
fn distinct_sorted(records: &[MovieRecord], column: TextColumn) -> Vec<String> {
    let values: BTreeSet<&str> = records
        .par_iter()
        .filter_map(|record| column.value_of(record))
        .collect();
    values.into_iter().map(str::to_owned).collect()
}
