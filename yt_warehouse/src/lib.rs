//! Tabular half of the YouTube analytics pipeline: staging transformers
//! (raw JSON to flat parquet snapshots), the warehouse builder that folds
//! snapshot history into dimension and fact tables, and the read-only
//! consumers (SQL analysis, CSV export).

pub mod analysis;
pub mod errors;
pub mod export;
pub mod io;
pub mod transform;
pub mod warehouse;
