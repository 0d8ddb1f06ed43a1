use std::path::PathBuf;

use thiserror::Error;

use shared_utils::layout::LayoutError;

/// The unified error type for the `yt_warehouse` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input file is absent. Fatal: the stage aborts before
    /// writing anything.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Raw partition discovery failed (missing root, no partitions).
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// An error from the Polars library.
    #[error("Polars operation failed")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Raw JSON could not be decoded.
    #[error("JSON decode failed")]
    Json(#[from] serde_json::Error),
}
