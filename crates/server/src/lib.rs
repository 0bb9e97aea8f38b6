//! Server crate for the ReelPicks movie browser.
//!
//! This crate wires the dataset, the query engine and the poster resolver
//! into one orchestrator, and exposes it over a small JSON API.

pub mod api;
pub mod config;
pub mod orchestrator;

pub use api::{router, serve};
pub use config::{AppConfig, DEFAULT_BIND_ADDR};
pub use orchestrator::{AxisOptions, MovieRecommendation, RecommendationOrchestrator};
