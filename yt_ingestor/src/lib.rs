//! API-side half of the YouTube analytics pipeline: typed raw models,
//! the [`providers::MetadataProvider`] abstraction over the YouTube Data
//! API, and the extractors that persist run-date-partitioned raw JSON.

pub mod errors;
pub mod extract;
pub mod models;
pub mod providers;
