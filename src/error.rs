use std::io;

use thiserror::Error;

/// Errors reported by paths, vectors and the adapters around them.
///
/// A failing path operation leaves the path as it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Negative path location, stale point handle or a malformed argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A path location that no segment of the path covers
    #[error("not found: {0}")]
    NotFound(String),
    /// Normalizing or taking the angle of a zero length vector
    #[error("degenerate vector, zero length vector has no direction")]
    DegenerateVector,
    #[error("failed to parse points: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
