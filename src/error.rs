//! Error types for DAG construction, path counting and the greedy driver.

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, DrsError>;

/// Errors surfaced by the public API.
///
/// Numeric saturation in the approximate flavour is deliberately *not* an
/// error: it shows up as reduced accuracy in the returned counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrsError {
    #[error("skip source {skip_source} of vertex {vertex} must be below {vertex} - 1")]
    InvalidSkipSource { vertex: usize, skip_source: usize },

    #[error("skip source {skip_source} of vertex {vertex} is outside 0..{len}")]
    SourceOutOfRange {
        vertex: usize,
        skip_source: usize,
        len: usize,
    },

    #[error("removal set covers {actual} vertices but the DAG has {expected}")]
    RemovalSetMismatch { expected: usize, actual: usize },

    #[error("target depth must be at least 1")]
    ZeroDepth,

    #[error("vertex {vertex} is outside 0..{len}")]
    VertexOutOfRange { vertex: usize, len: usize },

    #[error("greedy iteration {iteration} found paths but no removable vertex")]
    NoProgress { iteration: usize },
}
