//! # Data Loader Crate
//!
//! This crate fetches the movie CSV export and holds it in memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, TextColumn, Dataset)
//! - **parser**: Parse the CSV payload into rows
//! - **index**: Build the dataset and its picker options
//! - **fetch**: Remote/file sources and the process-lifetime cache
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DatasetCache, DatasetSource, TextColumn};
//!
//! let cache = DatasetCache::new(DatasetSource::default());
//! let dataset = cache.get().await?;
//!
//! println!("{} rows", dataset.len());
//! println!("genres: {:?}", dataset.distinct_values(TextColumn::Genre));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod fetch;

// Re-export commonly used types for convenience
pub use error::{LoadError, Result};
pub use fetch::{DatasetCache, DatasetSource, DEFAULT_DATASET_URL, load};
pub use types::{
    Dataset,
    MovieRecord,
    TextColumn,
    REQUIRED_COLUMNS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();

        assert!(dataset.is_empty());
        assert_eq!(dataset.max_rating(), None);
        assert!(dataset.distinct_values(TextColumn::Genre).is_empty());
    }

    #[test]
    fn test_text_column_headers() {
        let headers: Vec<_> = TextColumn::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(headers, ["genres", "primaryName", "language_name"]);
        assert!(headers.iter().all(|h| REQUIRED_COLUMNS.contains(h)));
    }

    #[test]
    fn test_value_of_reads_the_right_field() {
        let record = MovieRecord::new("Amélie", 8.3, "Romance", "Audrey Tautou", "French");

        assert_eq!(TextColumn::Genre.value_of(&record), Some("Romance"));
        assert_eq!(TextColumn::CastMember.value_of(&record), Some("Audrey Tautou"));
        assert_eq!(TextColumn::Language.value_of(&record), Some("French"));
    }
}
