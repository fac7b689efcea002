//! Error types for Umbra

use thiserror::Error;

/// Result type alias using Umbra's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building scenes or rendering them
#[derive(Error, Debug)]
pub enum Error {
    /// A zero-length (or non-finite) vector was normalized
    #[error("Cannot normalize a degenerate vector")]
    DegenerateVector,

    /// A scene was constructed without any shapes
    #[error("Scene must contain at least one shape")]
    EmptyScene,

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing error
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
}
