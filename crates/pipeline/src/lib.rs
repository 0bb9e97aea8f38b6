//! Query pipeline for browsing the movie table.
//!
//! This crate provides:
//! - Filter trait and implementations for row selection
//! - FilterPipeline for composing filters
//! - FilterRequest / Axis / ActiveFilter describing what the user picked
//! - QueryEngine: select, dedup by title, rank by rating, take the top 8
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterRequest, query};
//!
//! let request = FilterRequest::Genre("Drama".to_string());
//! let rows = query(&dataset, &request);
//!
//! for row in &rows {
//!     println!("{} ({:?})", row.title, row.rating);
//! }
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod request;
pub mod query;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use request::{ActiveFilter, Axis, FilterRequest};
pub use query::{DEFAULT_RESULT_LIMIT, MovieRow, QueryEngine, query};
